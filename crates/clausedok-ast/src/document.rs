//! Document root, sections, blocks and runs
//!
//! The wire format uses the short SFDT keys: a document holds sections in
//! `sec`, a section holds blocks in `b`, a block holds runs in `i` and a run
//! carries its text in `tlp`. Every other key is kept verbatim in the node's
//! [`Fields`] so that a parse/serialize cycle does not lose formatting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{NodeMut, NodeRef};
use crate::path::Path;

/// Opaque properties of a node (formatting, headers, nested objects)
pub type Fields = Map<String, Value>;

/// A complete document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document sections, in order
    #[serde(rename = "sec", default)]
    pub sections: Vec<Section>,
    /// Document-level properties (styles, lists, ...)
    #[serde(flatten)]
    pub fields: Fields,
}

/// A section: an ordered list of blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Blocks (paragraphs) in this section
    #[serde(rename = "b")]
    pub blocks: Vec<Block>,
    /// Section properties (page setup, headers and footers)
    #[serde(flatten)]
    pub fields: Fields,
}

/// A block (paragraph): an ordered list of inline runs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Inline runs
    #[serde(rename = "i")]
    pub inlines: Vec<Run>,
    /// Block-level properties, preserved but not interpreted
    #[serde(flatten)]
    pub fields: Fields,
}

/// An inline run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    /// Literal text, possibly containing `{name}` markers
    #[serde(rename = "tlp", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Character formatting and any nested inline objects
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a list of sections
    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections,
            fields: Fields::new(),
        }
    }

    /// Add a section to the document
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Total number of blocks across all sections
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Iterate over every block in document order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    /// Consume the document and return every block in document order
    pub fn into_blocks(self) -> Vec<Block> {
        self.sections.into_iter().flat_map(|s| s.blocks).collect()
    }

    /// Resolve a path to a node view
    pub fn node_at(&self, path: &Path) -> Option<NodeRef<'_>> {
        path.steps()
            .iter()
            .try_fold(NodeRef::Document(self), |node, step| node.step(step))
    }

    /// Resolve a path to a mutable node view
    pub fn node_at_mut(&mut self, path: &Path) -> Option<NodeMut<'_>> {
        path.steps()
            .iter()
            .try_fold(NodeMut::Document(self), |node, step| node.step(step))
    }

    /// Text of the node at `path`, if that node carries text
    pub fn text_at(&self, path: &Path) -> Option<&str> {
        self.node_at(path)?.text()
    }

    /// Mutable text of the node at `path`, if that node carries text
    pub fn text_at_mut(&mut self, path: &Path) -> Option<&mut String> {
        self.node_at_mut(path)?.into_text_mut()
    }
}

impl Section {
    /// Create a section from a list of blocks
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            fields: Fields::new(),
        }
    }
}

impl Block {
    /// Create a block from a list of runs
    pub fn new(inlines: Vec<Run>) -> Self {
        Self {
            inlines,
            fields: Fields::new(),
        }
    }

    /// Create a block holding a single text run
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .filter_map(|r| r.text.as_deref())
            .collect()
    }

    /// Paragraph format (`pf`), if present
    pub fn paragraph_format(&self) -> Option<&Value> {
        self.fields.get("pf")
    }
}

impl Run {
    /// Create a run holding plain text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            fields: Fields::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_deserialize_short_keys() {
        let doc: Document = serde_json::from_value(json!({
            "sec": [{ "b": [{ "i": [{ "tlp": "Hello" }], "pf": { "ta": "Left" } }] }]
        }))
        .unwrap();

        assert_eq!(doc.len(), 1);
        let block = &doc.sections[0].blocks[0];
        assert_eq!(block.text(), "Hello");
        assert_eq!(block.paragraph_format(), Some(&json!({ "ta": "Left" })));
    }

    #[test]
    fn test_missing_sections_defaults_to_empty() {
        let doc: Document = serde_json::from_value(json!({ "optimizeSfdt": true })).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.fields.get("optimizeSfdt"), Some(&json!(true)));
    }

    #[test]
    fn test_section_without_blocks_is_rejected() {
        let result: Result<Document, _> = serde_json::from_value(json!({ "sec": [{}] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_block_without_runs_is_rejected() {
        let result: Result<Document, _> =
            serde_json::from_value(json!({ "sec": [{ "b": [{ "pf": {} }] }] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_opaque_fields_survive_serialization() {
        let value = json!({
            "sec": [{
                "b": [{ "i": [{ "tlp": "x", "cf": { "b": true } }] }],
                "sf": { "pw": 612 }
            }],
            "sty": []
        });
        let doc: Document = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }

    #[test]
    fn test_run_without_text_omits_tlp() {
        let run = Run {
            text: None,
            fields: Fields::new(),
        };
        assert_eq!(serde_json::to_value(&run).unwrap(), json!({}));
    }

    #[test]
    fn test_blocks_iterate_in_document_order() {
        let doc = Document::with_sections(vec![
            Section::new(vec![Block::from_text("a"), Block::from_text("b")]),
            Section::new(vec![Block::from_text("c")]),
        ]);
        let texts: Vec<String> = doc.blocks().map(Block::text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(doc.block_count(), 3);
    }
}
