//! Node views for path resolution
//!
//! [`NodeRef`] and [`NodeMut`] are borrowed views of whatever a path step can
//! land on: one of the typed nodes, one of their child lists, or an opaque
//! JSON value inside a node's properties.

use serde_json::Value;

use crate::document::{Block, Document, Run, Section};
use crate::path::{PathStep, BLOCKS, INLINES, SECTIONS};

/// Text field carried by runs and by opaque inline objects
pub const TEXT: &str = "tlp";

/// Kind of node a view points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Sections,
    Section,
    Blocks,
    Block,
    Runs,
    Run,
    Opaque,
}

/// Borrowed view of a node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Sections(&'a [Section]),
    Section(&'a Section),
    Blocks(&'a [Block]),
    Block(&'a Block),
    Runs(&'a [Run]),
    Run(&'a Run),
    Value(&'a Value),
}

/// Mutable view of a node
#[derive(Debug)]
pub enum NodeMut<'a> {
    Document(&'a mut Document),
    Sections(&'a mut Vec<Section>),
    Section(&'a mut Section),
    Blocks(&'a mut Vec<Block>),
    Block(&'a mut Block),
    Runs(&'a mut Vec<Run>),
    Run(&'a mut Run),
    Value(&'a mut Value),
}

impl<'a> NodeRef<'a> {
    /// Follow one step down the tree
    pub fn step(self, step: &PathStep) -> Option<NodeRef<'a>> {
        match (self, step) {
            (NodeRef::Document(d), PathStep::Field(f)) if f == SECTIONS => {
                Some(NodeRef::Sections(&d.sections))
            }
            (NodeRef::Document(d), PathStep::Field(f)) => d.fields.get(f).map(NodeRef::Value),
            (NodeRef::Sections(s), PathStep::Index(i)) => s.get(*i).map(NodeRef::Section),
            (NodeRef::Section(s), PathStep::Field(f)) if f == BLOCKS => {
                Some(NodeRef::Blocks(&s.blocks))
            }
            (NodeRef::Section(s), PathStep::Field(f)) => s.fields.get(f).map(NodeRef::Value),
            (NodeRef::Blocks(b), PathStep::Index(i)) => b.get(*i).map(NodeRef::Block),
            (NodeRef::Block(b), PathStep::Field(f)) if f == INLINES => {
                Some(NodeRef::Runs(&b.inlines))
            }
            (NodeRef::Block(b), PathStep::Field(f)) => b.fields.get(f).map(NodeRef::Value),
            (NodeRef::Runs(r), PathStep::Index(i)) => r.get(*i).map(NodeRef::Run),
            (NodeRef::Run(r), PathStep::Field(f)) => r.fields.get(f).map(NodeRef::Value),
            (NodeRef::Value(v), PathStep::Field(f)) => v.as_object()?.get(f).map(NodeRef::Value),
            (NodeRef::Value(v), PathStep::Index(i)) => v.as_array()?.get(*i).map(NodeRef::Value),
            _ => None,
        }
    }

    /// Text carried by this node (`tlp`)
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            NodeRef::Run(r) => r.text.as_deref(),
            NodeRef::Value(v) => v.as_object()?.get(TEXT)?.as_str(),
            _ => None,
        }
    }

    /// Kind of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Document(_) => NodeKind::Document,
            NodeRef::Sections(_) => NodeKind::Sections,
            NodeRef::Section(_) => NodeKind::Section,
            NodeRef::Blocks(_) => NodeKind::Blocks,
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::Runs(_) => NodeKind::Runs,
            NodeRef::Run(_) => NodeKind::Run,
            NodeRef::Value(_) => NodeKind::Opaque,
        }
    }
}

impl<'a> NodeMut<'a> {
    /// Follow one step down the tree
    pub fn step(self, step: &PathStep) -> Option<NodeMut<'a>> {
        match (self, step) {
            (NodeMut::Document(d), PathStep::Field(f)) if f == SECTIONS => {
                Some(NodeMut::Sections(&mut d.sections))
            }
            (NodeMut::Document(d), PathStep::Field(f)) => {
                d.fields.get_mut(f).map(NodeMut::Value)
            }
            (NodeMut::Sections(s), PathStep::Index(i)) => s.get_mut(*i).map(NodeMut::Section),
            (NodeMut::Section(s), PathStep::Field(f)) if f == BLOCKS => {
                Some(NodeMut::Blocks(&mut s.blocks))
            }
            (NodeMut::Section(s), PathStep::Field(f)) => s.fields.get_mut(f).map(NodeMut::Value),
            (NodeMut::Blocks(b), PathStep::Index(i)) => b.get_mut(*i).map(NodeMut::Block),
            (NodeMut::Block(b), PathStep::Field(f)) if f == INLINES => {
                Some(NodeMut::Runs(&mut b.inlines))
            }
            (NodeMut::Block(b), PathStep::Field(f)) => b.fields.get_mut(f).map(NodeMut::Value),
            (NodeMut::Runs(r), PathStep::Index(i)) => r.get_mut(*i).map(NodeMut::Run),
            (NodeMut::Run(r), PathStep::Field(f)) => r.fields.get_mut(f).map(NodeMut::Value),
            (NodeMut::Value(v), PathStep::Field(f)) => {
                v.as_object_mut()?.get_mut(f).map(NodeMut::Value)
            }
            (NodeMut::Value(v), PathStep::Index(i)) => {
                v.as_array_mut()?.get_mut(*i).map(NodeMut::Value)
            }
            _ => None,
        }
    }

    /// Consume the view and return its text for editing
    pub fn into_text_mut(self) -> Option<&'a mut String> {
        match self {
            NodeMut::Run(r) => r.text.as_mut(),
            NodeMut::Value(v) => match v.as_object_mut()?.get_mut(TEXT)? {
                Value::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use serde_json::json;

    fn sample() -> Document {
        serde_json::from_value(json!({
            "sec": [{
                "b": [
                    { "i": [{ "tlp": "first" }, { "tlp": "second" }] },
                    { "i": [{ "tlp": "third", "fieldData": { "tlp": "{nested}" } }] }
                ],
                "hf": { "header": { "tlp": "{company}" } }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_run_text() {
        let doc = sample();
        assert_eq!(doc.text_at(&Path::run(0, 0, 1)), Some("second"));
        assert_eq!(doc.text_at(&Path::run(0, 1, 0)), Some("third"));
    }

    #[test]
    fn test_resolve_opaque_text() {
        let doc = sample();
        let nested = Path::run(0, 1, 0).field("fieldData");
        assert_eq!(doc.text_at(&nested), Some("{nested}"));

        let header = Path::root().field("sec").index(0).field("hf").field("header");
        assert_eq!(doc.text_at(&header), Some("{company}"));
    }

    #[test]
    fn test_out_of_range_resolves_to_none() {
        let doc = sample();
        assert!(doc.node_at(&Path::run(0, 5, 0)).is_none());
        assert!(doc.node_at(&Path::root().index(0)).is_none());
    }

    #[test]
    fn test_node_kinds() {
        let doc = sample();
        assert_eq!(doc.node_at(&Path::root()).map(|n| n.kind()), Some(NodeKind::Document));
        assert_eq!(doc.node_at(&Path::block(0, 1)).map(|n| n.kind()), Some(NodeKind::Block));
        assert_eq!(
            doc.node_at(&Path::root().field("sec")).map(|n| n.kind()),
            Some(NodeKind::Sections)
        );
    }

    #[test]
    fn test_edit_text_in_place() {
        let mut doc = sample();
        if let Some(text) = doc.text_at_mut(&Path::run(0, 0, 0)) {
            text.push_str("!");
        }
        let nested = Path::run(0, 1, 0).field("fieldData");
        if let Some(text) = doc.text_at_mut(&nested) {
            *text = "filled".to_string();
        }
        assert_eq!(doc.text_at(&Path::run(0, 0, 0)), Some("first!"));
        assert_eq!(doc.text_at(&nested), Some("filled"));
    }

    #[test]
    fn test_blocks_have_no_text() {
        let mut doc = sample();
        assert!(doc.text_at(&Path::block(0, 0)).is_none());
        assert!(doc.text_at_mut(&Path::block(0, 0)).is_none());
    }
}
