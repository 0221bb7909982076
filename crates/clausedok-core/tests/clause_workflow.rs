//! End-to-end tests for clause insertion, removal and template filling
//!
//! Fixtures live in `tests/fixtures`: a two-section agreement with
//! placeholders in runs, in a header and in a later section, plus a small
//! clause catalog.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clausedok_ast::{Clause, Document};
use clausedok_core::codec;
use clausedok_core::error::EditError;
use clausedok_core::inject::try_add_clause;
use clausedok_core::remove::try_remove_clause;
use clausedok_core::{
    ClauseCoordinator, ClauseState, DocumentService, MatchMode, MemorySession, RemovalOutcome,
    Settings,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn agreement() -> String {
    fs::read_to_string(fixture_path("agreement.json")).unwrap()
}

fn catalog() -> Vec<Clause> {
    let raw = fs::read_to_string(fixture_path("clauses.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn clause(id: &str) -> Clause {
    catalog().into_iter().find(|c| c.id == id).unwrap()
}

fn section_texts(content: &str) -> Vec<Vec<String>> {
    codec::parse(content)
        .unwrap()
        .sections
        .iter()
        .map(|s| s.blocks.iter().map(|b| b.text()).collect())
        .collect()
}

#[test]
fn test_round_trip_keeps_unknown_fields() {
    let doc = codec::parse(&agreement()).unwrap();
    let again = codec::parse(&codec::serialize(&doc).unwrap()).unwrap();
    assert_eq!(doc, again);
    assert!(doc.fields.contains_key("sty"));
    assert!(doc.sections[0].fields.contains_key("secPr"));
    assert!(doc.sections[0].blocks[0].paragraph_format().is_some());
}

#[test]
fn test_placeholders_across_runs_headers_and_sections() {
    let service = DocumentService::default();
    assert_eq!(
        service.identify_placeholders(&agreement()),
        vec!["date", "client name", "Confidentiality"]
    );
}

#[test]
fn test_clause_lands_after_its_placeholder() {
    let updated = try_add_clause(&agreement(), &clause("conf"), MatchMode::Loose).unwrap();
    let texts = section_texts(&updated);

    assert_eq!(texts[0].len(), 7);
    assert_eq!(texts[0][3], "{Confidentiality}");
    assert_eq!(
        texts[0][4],
        "Confidential Information means any non-public information."
    );
    assert_eq!(texts[0][5], "Each party keeps it secret.");
    assert_eq!(texts[0][6], "The parties agree to the terms below.");
    assert_eq!(texts[1].len(), 2);
}

#[test]
fn test_clause_without_placeholder_is_appended_to_last_section() {
    let before = section_texts(&agreement());
    let updated = try_add_clause(&agreement(), &clause("term"), MatchMode::Loose).unwrap();
    let after = section_texts(&updated);

    assert_eq!(after[0], before[0]);
    assert_eq!(after[1][..2], before[1][..]);
    assert_eq!(
        after[1][2],
        "Either party may terminate with 30 days notice."
    );
}

#[test]
fn test_malformed_clause_leaves_content_untouched() {
    let service = DocumentService::default();
    let broken = clause("broken");

    assert_eq!(service.add_clause(&agreement(), &broken), agreement());
    let err = try_add_clause(&agreement(), &broken, MatchMode::Loose).unwrap_err();
    assert!(matches!(err, EditError::Parse { .. }));
    assert!(!err.is_expected());
}

#[test]
fn test_removing_absent_clause_is_a_warning() {
    let service = DocumentService::default();
    let term = clause("term");

    assert_eq!(service.remove_clause(&agreement(), &term), agreement());
    let err = try_remove_clause(&agreement(), &term).unwrap_err();
    assert!(matches!(err, EditError::NotFound(_)));
    assert!(err.is_expected());
}

#[test]
fn test_add_then_remove_restores_paragraphs() {
    let service = DocumentService::default();
    let term = clause("term");

    let added = service.add_clause(&agreement(), &term);
    let removed = service.remove_clause(&added, &term);
    assert_eq!(
        codec::parse(&removed).unwrap(),
        codec::parse(&agreement()).unwrap()
    );
}

#[test]
fn test_fill_templates() {
    let service = DocumentService::default();
    let values = HashMap::from([
        ("date".to_string(), "1 March 2026".to_string()),
        ("client name".to_string(), "Ann".to_string()),
    ]);

    let filled = service.process_templates(&agreement(), &values);
    let texts = section_texts(&filled);
    assert_eq!(
        texts[0][1],
        "This agreement is made on 1 March 2026 between the parties."
    );
    assert_eq!(texts[0][2], "Dear Ann,");
    assert_eq!(texts[0][3], "{Confidentiality}");
    assert_eq!(texts[1][0], "Signed on 1 March 2026");

    let doc: Document = codec::parse(&filled).unwrap();
    assert_eq!(doc.sections[0].fields["hf"]["h"]["tlp"], "1 March 2026");
    assert_eq!(service.identify_placeholders(&filled), vec!["Confidentiality"]);
}

#[test]
fn test_coordinator_round_trip_through_live_session() {
    let mut coordinator =
        ClauseCoordinator::new(DocumentService::default(), Some(MemorySession::new()));
    for c in catalog() {
        coordinator.select(c);
    }

    let mut content = agreement();
    for id in ["conf", "term"] {
        content = coordinator.inject(&content, id).unwrap();
    }
    assert!(coordinator.inject(&content, "broken").is_err());
    assert_eq!(coordinator.clause_ids(), "conf,term");
    assert_eq!(coordinator.pending().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["broken"]);

    coordinator.session_mut().unwrap().open(&content).unwrap();
    let outcome = coordinator.remove(&content, "conf");
    assert_eq!(
        outcome,
        RemovalOutcome::Removed {
            strategy: "live-surface",
            content: None
        }
    );
    assert_eq!(coordinator.state("conf"), Some(ClauseState::Removed));
    assert_eq!(coordinator.clause_ids(), "term");

    let live = coordinator.session().unwrap().serialize().unwrap();
    let texts = section_texts(&live);
    assert_eq!(texts[0][4], "Each party keeps it secret.");
}

#[test]
fn test_coordinator_without_session_uses_tree_surgery() {
    let settings = Settings::from_toml_str("[removal]\nmatch_case = true\n").unwrap();
    let mut coordinator: ClauseCoordinator<MemorySession> =
        ClauseCoordinator::new(DocumentService::new(settings), None);
    coordinator.select(clause("term"));

    let added = coordinator.inject(&agreement(), "term").unwrap();
    let outcome = coordinator.remove(&added, "term");
    assert!(matches!(
        outcome,
        RemovalOutcome::Removed {
            strategy: "tree-surgery",
            ..
        }
    ));
    assert_eq!(
        codec::parse(outcome.content().unwrap()).unwrap(),
        codec::parse(&agreement()).unwrap()
    );
}
