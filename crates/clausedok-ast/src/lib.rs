//! clausedok-ast - Document tree definitions
//!
//! This crate provides the typed tree used by clausedok for representing
//! serialized (SFDT-style) documents: sections containing blocks containing
//! inline runs, plus the path type used to address nodes inside that tree.

pub mod clause;
pub mod document;
pub mod node;
pub mod path;

pub use clause::Clause;
pub use document::{Block, Document, Fields, Run, Section};
pub use node::{NodeKind, NodeMut, NodeRef};
pub use path::{Path, PathStep};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
