//! Placeholder and text search over a document tree
//!
//! Both searches walk the tree in document order (pre-order) and report
//! the [`Path`] of every hit. Paths are only valid until the next
//! structural edit of the tree they were computed on.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use clausedok_ast::node::TEXT;
use clausedok_ast::path::{BLOCKS, INLINES, SECTIONS};
use clausedok_ast::{Block, Document, Fields, Path, PathStep, Section};

/// A `{name}` marker found in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// Full text of the node carrying the marker
    pub raw: String,
    /// Address of that node
    pub path: Path,
    /// First `{…}` capture of `raw`
    pub name: String,
}

/// A run whose text contains a searched substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    /// Address of the run
    pub path: Path,
    /// Full text of the run
    pub text: String,
}

/// Where a clause's identifying text currently lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseLocation {
    pub section_index: usize,
    pub block_index: usize,
    pub matched: TextMatch,
}

impl Placeholder {
    /// Section and block indices of the paragraph holding this marker
    pub fn block_position(&self) -> Option<(usize, usize)> {
        self.path.block_position()
    }
}

/// Extract the placeholder name from marker text
///
/// Returns the first `{…}` capture, e.g. `"Dear {name},"` → `"name"`.
pub fn extract_name(marker: &str) -> Option<&str> {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    let re = MARKER_RE.get_or_init(|| Regex::new(r"\{([^}]+)\}").unwrap());
    re.captures(marker)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Find every placeholder marker in the document, in document order
///
/// Markers are looked for in run text and in any opaque nested object that
/// carries a `tlp` string. Placeholders with the same name are all reported.
pub fn find_placeholders(doc: &Document) -> Vec<Placeholder> {
    let mut found = Vec::new();
    walk_text(doc, &mut |path, text| {
        if !(text.contains('{') && text.contains('}')) {
            return;
        }
        match extract_name(text) {
            Some(name) => found.push(Placeholder {
                raw: text.to_string(),
                path: path.clone(),
                name: name.to_string(),
            }),
            None => debug!("Ignoring braces without a marker name at {}", path),
        }
    });
    found
}

/// First placeholder (in document order) with the given name
pub fn find_placeholder_by_name(doc: &Document, name: &str) -> Option<Placeholder> {
    find_placeholders(doc).into_iter().find(|p| p.name == name)
}

/// The document's sections
pub fn find_sections(doc: &Document) -> &[Section] {
    &doc.sections
}

/// Every block with its path, in document order
pub fn find_paragraphs(doc: &Document) -> Vec<(Path, &Block)> {
    doc.sections
        .iter()
        .enumerate()
        .flat_map(|(si, section)| {
            section
                .blocks
                .iter()
                .enumerate()
                .map(move |(bi, block)| (Path::block(si, bi), block))
        })
        .collect()
}

/// Find every run whose text contains `needle` (case-sensitive)
///
/// Only inline runs are searched. An empty needle matches nothing.
pub fn find_text_in_document(doc: &Document, needle: &str) -> Vec<TextMatch> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (block_path, block) in find_paragraphs(doc) {
        for (ri, run) in block.inlines.iter().enumerate() {
            if let Some(text) = run.text.as_deref().filter(|t| t.contains(needle)) {
                matches.push(TextMatch {
                    path: block_path.clone().field(INLINES).index(ri),
                    text: text.to_string(),
                });
            }
        }
    }
    matches
}

/// Locate the paragraph holding a clause's identifying text
pub fn identify_clause(doc: &Document, identifying_text: &str) -> Option<ClauseLocation> {
    let matched = find_text_in_document(doc, identifying_text)
        .into_iter()
        .next()?;
    let (section_index, block_index) = matched.path.block_position()?;
    Some(ClauseLocation {
        section_index,
        block_index,
        matched,
    })
}

/// Visit every text-carrying node in pre-order
///
/// Within a node the child list comes first (runs of a block, blocks of a
/// section, sections of the document), then the node's own properties in
/// key order.
fn walk_text<F: FnMut(&Path, &str)>(doc: &Document, visit: &mut F) {
    let root = Path::root();
    for (si, section) in doc.sections.iter().enumerate() {
        let section_path = root.clone().field(SECTIONS).index(si);
        for (bi, block) in section.blocks.iter().enumerate() {
            let block_path = section_path.clone().field(BLOCKS).index(bi);
            for (ri, run) in block.inlines.iter().enumerate() {
                let run_path = block_path.clone().field(INLINES).index(ri);
                if let Some(text) = &run.text {
                    visit(&run_path, text);
                }
                walk_fields(&run.fields, &run_path, visit);
            }
            walk_fields(&block.fields, &block_path, visit);
        }
        walk_fields(&section.fields, &section_path, visit);
    }
    walk_fields(&doc.fields, &root, visit);
}

fn walk_fields<F: FnMut(&Path, &str)>(fields: &Fields, path: &Path, visit: &mut F) {
    for (key, value) in fields {
        walk_value(value, &path.child(PathStep::Field(key.clone())), visit);
    }
}

fn walk_value<F: FnMut(&Path, &str)>(value: &Value, path: &Path, visit: &mut F) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get(TEXT) {
                visit(path, text);
            }
            walk_fields(map, path, visit);
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk_value(item, &path.child(PathStep::Index(i)), visit);
            }
        }
        _ => {}
    }
}
