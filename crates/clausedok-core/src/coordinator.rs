//! Clause lifecycle coordination
//!
//! A [`ClauseCoordinator`] owns the editing session (if any) and the
//! [`DocumentService`], and tracks each clause through
//! `Selected → Injected → Removed`. Removal tries the configured strategies
//! in order, so a broken or absent session falls back to tree surgery.

use tracing::{debug, warn};

use clausedok_ast::Clause;

use crate::error::{EditError, Result};
use crate::inject;
use crate::remove::{LiveSurfaceRemoval, RemovalChain, RemovalOutcome, TreeSurgeryRemoval};
use crate::service::DocumentService;
use crate::session::EditingSession;

/// Where a clause is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseState {
    /// Chosen by the user, not yet in the document
    Selected,
    /// Inserted into the document
    Injected,
    /// Taken out of the document again
    Removed,
}

#[derive(Debug, Clone)]
struct TrackedClause {
    clause: Clause,
    state: ClauseState,
}

/// Drives clause injection and removal for one document
pub struct ClauseCoordinator<S> {
    service: DocumentService,
    session: Option<S>,
    clauses: Vec<TrackedClause>,
}

impl<S: EditingSession> ClauseCoordinator<S> {
    /// Create a coordinator over an optional editing session
    pub fn new(service: DocumentService, session: Option<S>) -> Self {
        Self {
            service,
            session,
            clauses: Vec::new(),
        }
    }

    /// The service used for every edit
    pub fn service(&self) -> &DocumentService {
        &self.service
    }

    /// The editing session, if one is attached
    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    /// Mutable access to the editing session
    pub fn session_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut()
    }

    /// Mark a clause as selected
    ///
    /// Selecting a known id replaces its clause and resets it to `Selected`.
    pub fn select(&mut self, clause: Clause) {
        match self.clauses.iter_mut().find(|t| t.clause.id == clause.id) {
            Some(tracked) => {
                tracked.clause = clause;
                tracked.state = ClauseState::Selected;
            }
            None => self.clauses.push(TrackedClause {
                clause,
                state: ClauseState::Selected,
            }),
        }
    }

    /// State of a tracked clause
    pub fn state(&self, clause_id: &str) -> Option<ClauseState> {
        self.tracked(clause_id).map(|t| t.state)
    }

    /// Selected clauses that are not injected yet
    pub fn pending(&self) -> impl Iterator<Item = &Clause> {
        self.clauses
            .iter()
            .filter(|t| t.state == ClauseState::Selected)
            .map(|t| &t.clause)
    }

    /// Insert a tracked clause into `content`
    ///
    /// With `guard_duplicates` set, injecting a clause that is already
    /// injected is refused.
    pub fn inject(&mut self, content: &str, clause_id: &str) -> Result<String> {
        let guard = self.service.settings().injection.guard_duplicates;
        let mode = self.service.settings().injection.match_mode;

        let tracked = self
            .clauses
            .iter_mut()
            .find(|t| t.clause.id == clause_id)
            .ok_or_else(|| EditError::NotFound(format!("clause {}", clause_id)))?;

        if guard && tracked.state == ClauseState::Injected {
            warn!("Clause {} is already injected; skipping", clause_id);
            return Err(EditError::AlreadyInjected(clause_id.to_string()));
        }

        let updated = inject::try_add_clause(content, &tracked.clause, mode)?;
        tracked.state = ClauseState::Injected;
        debug!("Injected clause {}", clause_id);
        Ok(updated)
    }

    /// Take an injected clause out again
    ///
    /// A clause that is not injected is left alone with a warning.
    pub fn remove(&mut self, content: &str, clause_id: &str) -> RemovalOutcome {
        let clause = match self.tracked(clause_id) {
            Some(t) if t.state == ClauseState::Injected => t.clause.clone(),
            Some(t) => {
                warn!("Clause {} is {:?}, not injected; nothing to remove", clause_id, t.state);
                return RemovalOutcome::NotRemoved;
            }
            None => {
                warn!("Clause {} is not tracked; nothing to remove", clause_id);
                return RemovalOutcome::NotRemoved;
            }
        };

        let removal = &self.service.settings().removal;
        let options = removal.search_options();
        let mut chain = if removal.live_first {
            RemovalChain::live_then_structural(self.session.as_mut(), options)
        } else {
            let mut chain = RemovalChain::new();
            chain.push(Box::new(TreeSurgeryRemoval));
            chain.push(Box::new(LiveSurfaceRemoval::new(self.session.as_mut(), options)));
            chain
        };
        let outcome = chain.remove(content, &clause);
        drop(chain);

        if outcome.is_success() {
            if let Some(tracked) = self.clauses.iter_mut().find(|t| t.clause.id == clause_id) {
                tracked.state = ClauseState::Removed;
            }
        }
        outcome
    }

    /// Comma-joined ids of the injected clauses, in selection order
    pub fn clause_ids(&self) -> String {
        self.clauses
            .iter()
            .filter(|t| t.state == ClauseState::Injected)
            .map(|t| t.clause.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn tracked(&self, clause_id: &str) -> Option<&TrackedClause> {
        self.clauses.iter().find(|t| t.clause.id == clause_id)
    }
}
