//! clausedok-core - Clause engine for SFDT documents
//!
//! Inserts reusable clauses at matching `{placeholder}` markers, removes them
//! again (through a live editing session or by editing the tree), and fills
//! template placeholders with values.
//!
//! # Example
//!
//! ```
//! use clausedok_ast::Clause;
//! use clausedok_core::DocumentService;
//!
//! let content = r#"{"sec":[{"b":[{"i":[{"tlp":"{greeting}"}]},{"i":[{"tlp":"Regards"}]}]}]}"#;
//! let clause = Clause::new(
//!     "hello",
//!     "Greeting",
//!     "Hello there",
//!     r#"{"sec":[{"b":[{"i":[{"tlp":"Hello there"}]}]}]}"#,
//! );
//!
//! let service = DocumentService::default();
//! let added = service.add_clause(content, &clause);
//! assert!(added.find("Hello there").unwrap() < added.find("Regards").unwrap());
//!
//! let removed = service.remove_clause(&added, &clause);
//! assert_eq!(removed, content);
//! ```

pub mod codec;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod inject;
pub mod locate;
pub mod remove;
pub mod service;
pub mod session;
pub mod template;

pub use config::{MatchMode, Settings};
pub use coordinator::{ClauseCoordinator, ClauseState};
pub use error::{EditError, Result, Severity};
pub use locate::{
    find_placeholder_by_name, find_placeholders, find_text_in_document, identify_clause,
    ClauseLocation, Placeholder, TextMatch,
};
pub use remove::{RemovalChain, RemovalOutcome, RemovalStrategy};
pub use service::DocumentService;
pub use session::{EditingSession, MemorySession, SearchOptions, SessionError};
pub use template::{identify_placeholders, process_templates};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
