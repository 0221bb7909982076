//! Editing-session capability surface
//!
//! Live-surface removal drives an interactive editor through three small
//! capabilities: search, selection and edit commands. Any editor that
//! implements all three is an [`EditingSession`].
//!
//! [`MemorySession`] implements the surface over an in-memory [`Document`],
//! so the live path can run without a real editor.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use clausedok_ast::Document;

use crate::codec;
use crate::error::Result;

/// Search flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Compare case-sensitively
    pub match_case: bool,
    /// Only match whole words
    pub whole_word: bool,
}

/// Failures reported by an editing session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session to talk to
    #[error("Editing session is missing")]
    Missing,

    /// No document loaded in the session
    #[error("No document is open")]
    NoDocument,

    /// Search result index past the end of the result set
    #[error("Search result {index} out of range ({count} results)")]
    ResultOutOfRange { index: usize, count: usize },

    /// Paragraph index past the end of the document
    #[error("Paragraph {0} out of range")]
    ParagraphOutOfRange(usize),

    /// Delete issued with nothing selected
    #[error("Nothing is selected")]
    NoSelection,

    /// Editor-specific failure
    #[error("{0}")]
    Other(String),
}

/// Result type for session calls
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Find-in-document capability
pub trait SearchCapability {
    /// Remove highlighting left by an earlier search
    fn clear_highlight(&mut self) -> SessionResult<()>;

    /// Search the whole document, replacing the current result set
    fn find_all(&mut self, text: &str, options: SearchOptions) -> SessionResult<()>;

    /// Number of results of the last search
    fn search_result_count(&self) -> usize;

    /// Index of the current search result
    fn current_search_result_index(&self) -> Option<usize>;

    /// Move to a search result, placing the selection on it
    fn set_current_result_index(&mut self, index: usize) -> SessionResult<()>;
}

/// Selection capability
pub trait SelectionCapability {
    /// Paragraph index at the start of the selection
    fn start_paragraph_index(&self) -> usize;

    /// Select a whole paragraph
    fn select_paragraph_by_index(&mut self, index: usize) -> SessionResult<()>;
}

/// Edit-command capability
pub trait EditCapability {
    /// Delete the current selection
    fn delete(&mut self) -> SessionResult<()>;
}

/// An editor exposing every capability live removal needs
pub trait EditingSession: SearchCapability + SelectionCapability + EditCapability {}

impl<T> EditingSession for T where T: SearchCapability + SelectionCapability + EditCapability + ?Sized {}

/// In-memory editing session over a parsed document
///
/// Paragraph indices are flat: they count blocks across all sections in
/// document order.
#[derive(Debug, Default)]
pub struct MemorySession {
    document: Option<Document>,
    /// Paragraph index of each search hit
    results: Vec<usize>,
    current: Option<usize>,
    selection_start: usize,
    selected: Option<usize>,
}

impl MemorySession {
    /// Create a session with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding `document`
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// Load serialized content, replacing any open document
    pub fn open(&mut self, content: &str) -> Result<()> {
        let document = codec::parse(content)?;
        *self = Self::with_document(document);
        Ok(())
    }

    /// Serialize the open document
    pub fn serialize(&self) -> Result<String> {
        match &self.document {
            Some(doc) => codec::serialize(doc),
            None => Ok(String::new()),
        }
    }

    /// The open document
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Currently selected paragraph
    pub fn selected_paragraph(&self) -> Option<usize> {
        self.selected
    }

    fn document_or_err(&self) -> SessionResult<&Document> {
        self.document.as_ref().ok_or(SessionError::NoDocument)
    }

    /// Map a flat paragraph index to section/block indices
    fn paragraph_position(doc: &Document, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (si, section) in doc.sections.iter().enumerate() {
            if remaining < section.blocks.len() {
                return Some((si, remaining));
            }
            remaining -= section.blocks.len();
        }
        None
    }
}

/// Count occurrences of `needle` in `haystack` honoring the search flags
fn count_occurrences(haystack: &str, needle: &str, options: SearchOptions) -> usize {
    let (haystack, needle) = if options.match_case {
        (haystack.to_string(), needle.to_string())
    } else {
        (haystack.to_lowercase(), needle.to_lowercase())
    };

    haystack
        .match_indices(needle.as_str())
        .filter(|(start, matched)| {
            if !options.whole_word {
                return true;
            }
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + matched.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

impl SearchCapability for MemorySession {
    fn clear_highlight(&mut self) -> SessionResult<()> {
        self.results.clear();
        self.current = None;
        Ok(())
    }

    fn find_all(&mut self, text: &str, options: SearchOptions) -> SessionResult<()> {
        let doc = self.document_or_err()?;
        let results = if text.is_empty() {
            Vec::new()
        } else {
            doc.blocks()
                .enumerate()
                .flat_map(|(index, block)| {
                    let hits = count_occurrences(&block.text(), text, options);
                    std::iter::repeat(index).take(hits)
                })
                .collect()
        };

        debug!("find_all({:?}) matched {} result(s)", text, results.len());
        self.results = results;
        self.current = None;
        Ok(())
    }

    fn search_result_count(&self) -> usize {
        self.results.len()
    }

    fn current_search_result_index(&self) -> Option<usize> {
        self.current
    }

    fn set_current_result_index(&mut self, index: usize) -> SessionResult<()> {
        let paragraph = *self
            .results
            .get(index)
            .ok_or(SessionError::ResultOutOfRange {
                index,
                count: self.results.len(),
            })?;
        self.current = Some(index);
        self.selection_start = paragraph;
        Ok(())
    }
}

impl SelectionCapability for MemorySession {
    fn start_paragraph_index(&self) -> usize {
        self.selection_start
    }

    fn select_paragraph_by_index(&mut self, index: usize) -> SessionResult<()> {
        let doc = self.document_or_err()?;
        if index >= doc.block_count() {
            return Err(SessionError::ParagraphOutOfRange(index));
        }
        self.selection_start = index;
        self.selected = Some(index);
        Ok(())
    }
}

impl EditCapability for MemorySession {
    fn delete(&mut self) -> SessionResult<()> {
        let index = self.selected.ok_or(SessionError::NoSelection)?;
        let doc = self.document.as_mut().ok_or(SessionError::NoDocument)?;
        let (si, bi) = Self::paragraph_position(doc, index)
            .ok_or(SessionError::ParagraphOutOfRange(index))?;
        doc.sections[si].blocks.remove(bi);

        // Earlier results point at shifted paragraphs
        self.selected = None;
        self.results.clear();
        self.current = None;
        Ok(())
    }
}
