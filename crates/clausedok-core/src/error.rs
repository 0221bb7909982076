//! Error types for document edit operations

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::session::SessionError;

/// How serious a failed operation is
///
/// Every failure leaves the input untouched; the severity only says whether
/// the outcome was expected (`Warning`) or points at bad input or a broken
/// collaborator (`Error`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected, non-corrupting outcome (text not found, duplicate)
    Warning,
    /// Malformed input, structural mismatch or session failure
    Error,
}

/// Errors that can occur while editing a document
#[derive(Error, Debug)]
pub enum EditError {
    /// Content or fragment is not a well-formed document
    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Document could not be written back
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Tree shape does not allow the edit
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// Search text or placeholder absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Clause already injected and the duplicate guard is on
    #[error("Clause already injected: {0}")]
    AlreadyInjected(String),

    /// Editing session missing or failing
    #[error("Editing session error: {0}")]
    Session(#[from] SessionError),
}

/// Result type for edit operations
pub type Result<T> = std::result::Result<T, EditError>;

impl EditError {
    pub(crate) fn parse(what: &'static str, source: serde_json::Error) -> Self {
        EditError::Parse { what, source }
    }

    /// Severity used when this error is logged
    pub fn severity(&self) -> Severity {
        match self {
            EditError::NotFound(_) | EditError::AlreadyInjected(_) => Severity::Warning,
            EditError::Parse { .. }
            | EditError::Serialize(_)
            | EditError::Structure(_)
            | EditError::Session(_) => Severity::Error,
        }
    }

    /// Whether this is an expected outcome rather than a fault
    pub fn is_expected(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// Log this error for `operation` at its severity
    pub fn log(&self, operation: &str) {
        match self.severity() {
            Severity::Warning => warn!("{}: {}", operation, self),
            Severity::Error => error!("{}: {}", operation, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_a_warning() {
        let err = EditError::NotFound("clause text".to_string());
        assert_eq!(err.severity(), Severity::Warning);
        assert!(err.is_expected());
    }

    #[test]
    fn test_parse_is_an_error() {
        let source = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = EditError::parse("clause content", source);
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.to_string().starts_with("Failed to parse clause content"));
    }

    #[test]
    fn test_session_errors_convert() {
        let err: EditError = SessionError::NoDocument.into();
        assert!(matches!(err, EditError::Session(SessionError::NoDocument)));
        assert!(!err.is_expected());
    }
}
