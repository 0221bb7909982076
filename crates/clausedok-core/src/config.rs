//! Engine settings
//!
//! Settings are read from `clausedok.toml`:
//!
//! ```toml
//! [injection]
//! match_mode = "loose"
//! guard_duplicates = false
//!
//! [removal]
//! match_case = false
//! whole_word = false
//! live_first = true
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};

use crate::session::SearchOptions;

/// How a clause name is matched against placeholder names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Either name contains the other (case-insensitive, whitespace ignored in the clause name)
    #[default]
    Loose,
    /// Names are equal once lowercased and stripped of whitespace
    Exact,
}

impl MatchMode {
    /// Check a placeholder name against a normalized clause name
    ///
    /// An empty key is contained in every name, so it matches loosely.
    pub fn matches(self, placeholder_name: &str, clause_key: &str) -> bool {
        match self {
            MatchMode::Loose => {
                let name = placeholder_name.to_lowercase();
                name.contains(clause_key) || clause_key.contains(name.as_str())
            }
            MatchMode::Exact => {
                let name: String = placeholder_name
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .flat_map(char::to_lowercase)
                    .collect();
                name == clause_key
            }
        }
    }
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Clause insertion settings
    pub injection: InjectionSettings,
    /// Clause removal settings
    pub removal: RemovalSettings,
    /// Log output settings
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Clause insertion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InjectionSettings {
    /// Placeholder matching rule
    pub match_mode: MatchMode,
    /// Refuse to inject a clause id that is already injected
    pub guard_duplicates: bool,
}

/// Clause removal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalSettings {
    /// Case-sensitive search in the editing session
    pub match_case: bool,
    /// Whole-word search in the editing session
    pub whole_word: bool,
    /// Try the editing session before tree surgery
    pub live_first: bool,
}

impl Default for RemovalSettings {
    fn default() -> Self {
        Self {
            match_case: false,
            whole_word: false,
            live_first: true,
        }
    }
}

impl RemovalSettings {
    /// Search options passed to the editing session
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            match_case: self.match_case,
            whole_word: self.whole_word,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
