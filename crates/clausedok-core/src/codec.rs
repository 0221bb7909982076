//! Parse and serialize document content
//!
//! The strict functions return [`EditError`]s; the `_lenient` variants log
//! and fall back to `None` / an empty string for callers that only want a
//! best-effort value.

use clausedok_ast::Document;

use crate::error::{EditError, Result};

/// Parse serialized document content
pub fn parse(content: &str) -> Result<Document> {
    serde_json::from_str(content).map_err(|e| EditError::parse("document content", e))
}

/// Parse a clause's serialized fragment
pub fn parse_fragment(content: &str) -> Result<Document> {
    serde_json::from_str(content).map_err(|e| EditError::parse("clause content", e))
}

/// Serialize a document to its compact JSON form
pub fn serialize(doc: &Document) -> Result<String> {
    serde_json::to_string(doc).map_err(EditError::Serialize)
}

/// Parse, logging and returning `None` on failure
pub fn parse_lenient(content: &str) -> Option<Document> {
    match parse(content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            e.log("parse document");
            None
        }
    }
}

/// Serialize, logging and returning an empty string on failure
pub fn serialize_lenient(doc: &Document) -> String {
    serialize(doc).unwrap_or_else(|e| {
        e.log("serialize document");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausedok_ast::{Block, Run, Section};
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let content = json!({
            "sec": [{
                "b": [
                    { "i": [{ "tlp": "Dear {name}," , "cf": { "fsz": 11 } }], "pf": {} },
                    { "i": [] }
                ],
                "sf": { "pw": 612.0 }
            }],
            "sty": [{ "n": "Normal" }]
        })
        .to_string();

        let doc = parse(&content).unwrap();
        let again = parse(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn test_round_trip_built_document() {
        let doc = Document::with_sections(vec![Section::new(vec![Block::new(vec![
            Run::new("a"),
            Run::new("{b}"),
        ])])]);
        assert_eq!(parse(&serialize(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_malformed_json() {
        let err = parse("{invalid json").unwrap_err();
        assert!(matches!(err, EditError::Parse { what: "document content", .. }));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(parse(r#"{"sec": [{"b": [{"pf": {}}]}]}"#).is_err());
        assert!(parse(r#"{"sec": "nope"}"#).is_err());
        assert!(parse("[]").is_err());
        assert!(parse("null").is_err());
    }

    #[test]
    fn test_fragment_error_names_the_fragment() {
        let err = parse_fragment("{invalid json").unwrap_err();
        assert!(matches!(err, EditError::Parse { what: "clause content", .. }));
    }

    #[test]
    fn test_lenient() {
        assert!(parse_lenient("not json").is_none());
        assert!(parse_lenient(r#"{"sec": []}"#).is_some());
        assert_eq!(serialize_lenient(&Document::new()), r#"{"sec":[]}"#);
    }
}
