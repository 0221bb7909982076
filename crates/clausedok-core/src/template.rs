//! Template placeholder filling and enumeration

use std::collections::{HashMap, HashSet};

use tracing::debug;

use clausedok_ast::Document;

use crate::codec;
use crate::error::Result;
use crate::locate::find_placeholders;

/// Fill placeholders with values, returning the original content on failure
pub fn process_templates(content: &str, values: &HashMap<String, String>) -> String {
    match try_process_templates(content, values) {
        Ok(updated) => updated,
        Err(e) => {
            e.log("process templates");
            content.to_string()
        }
    }
}

/// Fill placeholders in serialized content
pub fn try_process_templates(content: &str, values: &HashMap<String, String>) -> Result<String> {
    let doc = codec::parse(content)?;
    let updated = fill_placeholders(&doc, values);
    codec::serialize(&updated)
}

/// Fill placeholders in a copy of `doc`
///
/// Only the first `{name}` in each marker node is replaced; the rest of the
/// node's text is kept. Placeholders without a value, or with an empty one,
/// are left as they are.
pub fn fill_placeholders(doc: &Document, values: &HashMap<String, String>) -> Document {
    let mut updated = doc.clone();
    let mut filled = 0usize;

    for placeholder in find_placeholders(doc) {
        let Some(value) = values.get(&placeholder.name).filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some(text) = updated.text_at_mut(&placeholder.path) {
            let marker = format!("{{{}}}", placeholder.name);
            *text = text.replacen(&marker, value, 1);
            filled += 1;
        }
    }

    debug!("Filled {} placeholder(s)", filled);
    updated
}

/// Distinct placeholder names, in first-seen order
pub fn placeholder_names(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    find_placeholders(doc)
        .into_iter()
        .filter_map(|p| seen.insert(p.name.clone()).then_some(p.name))
        .collect()
}

/// Placeholder names of serialized content
pub fn try_identify_placeholders(content: &str) -> Result<Vec<String>> {
    let doc = codec::parse(content)?;
    Ok(placeholder_names(&doc))
}

/// Placeholder names of serialized content, empty when it does not parse
pub fn identify_placeholders(content: &str) -> Vec<String> {
    try_identify_placeholders(content).unwrap_or_else(|e| {
        e.log("identify placeholders");
        Vec::new()
    })
}
