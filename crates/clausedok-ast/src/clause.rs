//! Clause values
//!
//! A clause is an independently authored content fragment that can be
//! inserted into a document at a matching placeholder or at the end.

use serde::{Deserialize, Serialize};

/// A reusable content fragment
///
/// Clause catalogs use the keys `id`, `name`, `initial` and `content`,
/// which map to the fields below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Catalog identifier
    pub id: String,
    /// Display name, also used to match placeholders
    #[serde(rename = "name")]
    pub display_name: String,
    /// Short text that marks the clause in a document and is searched for on removal
    #[serde(rename = "initial")]
    pub identifying_text: String,
    /// Serialized document fragment
    pub content: String,
}

impl Clause {
    /// Create a new clause
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        identifying_text: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            identifying_text: identifying_text.into(),
            content: content.into(),
        }
    }

    /// Display name lowercased with all whitespace removed
    pub fn normalized_name(&self) -> String {
        self.display_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}
