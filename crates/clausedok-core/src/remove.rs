//! Clause removal
//!
//! Two interchangeable strategies remove a clause:
//!
//! - **Live surface**: drive an [`EditingSession`] through search, select
//!   and delete, so the editor's own undo history records the change.
//! - **Tree surgery**: find the clause's identifying text in the parsed
//!   tree and drop the enclosing paragraph.
//!
//! [`RemovalChain`] tries strategies in priority order until one succeeds.

use tracing::{debug, error, warn};

use clausedok_ast::{Clause, Document};

use crate::codec;
use crate::error::{EditError, Result};
use crate::locate::identify_clause;
use crate::session::{EditingSession, SearchOptions, SessionError};

/// Remove a clause by tree surgery, returning the original content on failure
///
/// A clause whose text is not in the document is logged as a warning.
pub fn remove_clause(content: &str, clause: &Clause) -> String {
    match try_remove_clause(content, clause) {
        Ok(updated) => updated,
        Err(e) => {
            e.log("remove clause");
            content.to_string()
        }
    }
}

/// Remove a clause from serialized content by tree surgery
pub fn try_remove_clause(content: &str, clause: &Clause) -> Result<String> {
    let doc = codec::parse(content)?;
    let updated = excise_clause(&doc, &clause.identifying_text)?;
    codec::serialize(&updated)
}

/// Drop the first paragraph containing `identifying_text` from a copy of `doc`
pub fn excise_clause(doc: &Document, identifying_text: &str) -> Result<Document> {
    let location = identify_clause(doc, identifying_text)
        .ok_or_else(|| EditError::NotFound(format!("clause text {:?}", identifying_text)))?;

    let mut updated = doc.clone();
    let blocks = updated
        .sections
        .get_mut(location.section_index)
        .map(|s| &mut s.blocks)
        .filter(|blocks| location.block_index < blocks.len())
        .ok_or_else(|| {
            EditError::Structure(format!(
                "paragraph {} of section {} does not exist",
                location.block_index, location.section_index
            ))
        })?;

    blocks.remove(location.block_index);
    debug!(
        "Removed paragraph {} of section {} ({})",
        location.block_index, location.section_index, location.matched.path
    );
    Ok(updated)
}

/// Remove a clause through a live editing session
///
/// Returns `false` when the session is missing, the text is not found, or
/// any session call fails. Never propagates session errors.
pub fn remove_via_editing_session<S>(
    session: Option<&mut S>,
    clause: &Clause,
    options: SearchOptions,
) -> bool
where
    S: EditingSession + ?Sized,
{
    let Some(session) = session else {
        error!("Editing session is missing; cannot remove clause {}", clause.id);
        return false;
    };

    match try_remove_via_session(session, clause, options) {
        Ok(()) => true,
        Err(e) => {
            e.log("remove clause via editing session");
            false
        }
    }
}

/// Search, select and delete the first occurrence of a clause's text
pub fn try_remove_via_session<S>(
    session: &mut S,
    clause: &Clause,
    options: SearchOptions,
) -> Result<()>
where
    S: EditingSession + ?Sized,
{
    session.clear_highlight()?;
    session.find_all(&clause.identifying_text, options)?;

    if session.search_result_count() == 0 {
        return Err(EditError::NotFound(format!(
            "clause text {:?} in editing session",
            clause.identifying_text
        )));
    }

    session.set_current_result_index(0)?;
    let paragraph = session.start_paragraph_index();
    session.select_paragraph_by_index(paragraph)?;
    session.delete()?;
    Ok(())
}

/// A way of removing a clause
pub trait RemovalStrategy {
    /// Human-readable name of this strategy
    fn name(&self) -> &'static str;

    /// Remove `clause`
    ///
    /// Returns the updated content when the strategy edits the serialized
    /// content, or `None` when it edited a live surface that now holds the
    /// result.
    fn remove(&mut self, content: &str, clause: &Clause) -> Result<Option<String>>;
}

/// Removal through an editing session
pub struct LiveSurfaceRemoval<'s, S: ?Sized> {
    session: Option<&'s mut S>,
    options: SearchOptions,
}

impl<'s, S: EditingSession + ?Sized> LiveSurfaceRemoval<'s, S> {
    /// Create a strategy over an optional session
    pub fn new(session: Option<&'s mut S>, options: SearchOptions) -> Self {
        Self { session, options }
    }
}

impl<S: EditingSession + ?Sized> RemovalStrategy for LiveSurfaceRemoval<'_, S> {
    fn name(&self) -> &'static str {
        "live-surface"
    }

    fn remove(&mut self, _content: &str, clause: &Clause) -> Result<Option<String>> {
        let session = self
            .session
            .as_deref_mut()
            .ok_or(SessionError::Missing)?;
        try_remove_via_session(session, clause, self.options)?;
        Ok(None)
    }
}

/// Removal by editing the parsed tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSurgeryRemoval;

impl RemovalStrategy for TreeSurgeryRemoval {
    fn name(&self) -> &'static str {
        "tree-surgery"
    }

    fn remove(&mut self, content: &str, clause: &Clause) -> Result<Option<String>> {
        try_remove_clause(content, clause).map(Some)
    }
}

/// Result of a removal attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// A strategy removed the clause
    Removed {
        /// Name of the strategy that succeeded
        strategy: &'static str,
        /// Updated content, or `None` if the live surface holds it
        content: Option<String>,
    },
    /// Every strategy failed
    NotRemoved,
}

impl RemovalOutcome {
    /// Whether the clause was removed
    pub fn is_success(&self) -> bool {
        matches!(self, RemovalOutcome::Removed { .. })
    }

    /// Updated content produced by a string-editing strategy
    pub fn content(&self) -> Option<&str> {
        match self {
            RemovalOutcome::Removed { content, .. } => content.as_deref(),
            RemovalOutcome::NotRemoved => None,
        }
    }
}

/// Removal strategies with fallback
///
/// Strategies are tried in the order they were added; the first success
/// wins.
#[derive(Default)]
pub struct RemovalChain<'a> {
    strategies: Vec<Box<dyn RemovalStrategy + 'a>>,
}

impl<'a> RemovalChain<'a> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Live surface first, tree surgery as fallback
    pub fn live_then_structural<S>(session: Option<&'a mut S>, options: SearchOptions) -> Self
    where
        S: EditingSession + ?Sized + 'a,
    {
        let mut chain = Self::new();
        chain.push(Box::new(LiveSurfaceRemoval::new(session, options)));
        chain.push(Box::new(TreeSurgeryRemoval));
        chain
    }

    /// Add a strategy at the lowest priority
    pub fn push(&mut self, strategy: Box<dyn RemovalStrategy + 'a>) {
        self.strategies.push(strategy);
    }

    /// Names of the strategies in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try each strategy until one succeeds
    pub fn remove(&mut self, content: &str, clause: &Clause) -> RemovalOutcome {
        for strategy in &mut self.strategies {
            match strategy.remove(content, clause) {
                Ok(content) => {
                    debug!("Removed clause {} with {}", clause.id, strategy.name());
                    return RemovalOutcome::Removed {
                        strategy: strategy.name(),
                        content,
                    };
                }
                Err(e) => {
                    e.log(&format!("{} removal of clause {}", strategy.name(), clause.id));
                }
            }
        }

        warn!("No removal strategy could remove clause {}", clause.id);
        RemovalOutcome::NotRemoved
    }
}
