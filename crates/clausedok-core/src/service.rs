//! Host-facing document service
//!
//! [`DocumentService`] is the whole surface a host application needs: five
//! string-in/string-out operations that never fail. Problems are logged and
//! the input is handed back unchanged.

use std::collections::HashMap;

use clausedok_ast::Clause;

use crate::config::Settings;
use crate::session::EditingSession;
use crate::{inject, remove, template};

/// Clause and template operations configured by [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct DocumentService {
    settings: Settings,
}

impl DocumentService {
    /// Create a service with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Insert a clause after its placeholder, or at the end of the document
    pub fn add_clause(&self, content: &str, clause: &Clause) -> String {
        inject::add_clause(content, clause, self.settings.injection.match_mode)
    }

    /// Remove a clause by editing the document tree
    pub fn remove_clause(&self, content: &str, clause: &Clause) -> String {
        remove::remove_clause(content, clause)
    }

    /// Remove a clause through a live editing session
    pub fn remove_via_editing_session<S>(&self, session: Option<&mut S>, clause: &Clause) -> bool
    where
        S: EditingSession + ?Sized,
    {
        remove::remove_via_editing_session(session, clause, self.settings.removal.search_options())
    }

    /// Fill placeholders with the provided values
    pub fn process_templates(&self, content: &str, values: &HashMap<String, String>) -> String {
        template::process_templates(content, values)
    }

    /// Distinct placeholder names in first-seen order
    pub fn identify_placeholders(&self, content: &str) -> Vec<String> {
        template::identify_placeholders(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchMode;
    use crate::session::MemorySession;
    use serde_json::json;

    fn content() -> String {
        json!({ "sec": [{ "b": [
            { "i": [{ "tlp": "{terms}" }] },
            { "i": [{ "tlp": "Signed" }] }
        ]}]})
        .to_string()
    }

    fn clause() -> Clause {
        Clause::new(
            "pt",
            "Payment Terms",
            "Net 30",
            json!({ "sec": [{ "b": [{ "i": [{ "tlp": "Net 30 days" }] }] }] }).to_string(),
        )
    }

    #[test]
    fn test_match_mode_comes_from_settings() {
        let loose = DocumentService::default().add_clause(&content(), &clause());
        assert_eq!(loose.matches("Net 30").count(), 1);
        assert!(loose.find("Net 30").unwrap() < loose.find("Signed").unwrap());

        let mut settings = Settings::default();
        settings.injection.match_mode = MatchMode::Exact;
        let exact = DocumentService::new(settings).add_clause(&content(), &clause());
        assert!(exact.find("Net 30").unwrap() > exact.find("Signed").unwrap());
    }

    #[test]
    fn test_add_then_remove() {
        let service = DocumentService::default();
        let added = service.add_clause(&content(), &clause());
        assert_eq!(service.remove_clause(&added, &clause()), content());
    }

    #[test]
    fn test_live_removal_uses_search_settings() {
        let mut settings = Settings::default();
        settings.removal.match_case = true;
        let service = DocumentService::new(settings);

        let mut session = MemorySession::new();
        session.open(&service.add_clause(&content(), &clause())).unwrap();

        let lowercase = Clause::new("pt", "Payment Terms", "net 30", "{}");
        assert!(!service.remove_via_editing_session(Some(&mut session), &lowercase));
        assert!(service.remove_via_editing_session(Some(&mut session), &clause()));
        assert_eq!(session.serialize().unwrap(), content());
    }

    #[test]
    fn test_templates() {
        let service = DocumentService::default();
        assert_eq!(service.identify_placeholders(&content()), vec!["terms"]);

        let values = HashMap::from([("terms".to_string(), "Net 60".to_string())]);
        let filled = service.process_templates(&content(), &values);
        assert!(service.identify_placeholders(&filled).is_empty());
    }
}
