//! Clause insertion
//!
//! A clause goes right after the paragraph holding the first placeholder
//! whose name matches the clause name. Without a matching placeholder the
//! paragraphs of the clause's first section are appended to the end of the
//! document.

use tracing::debug;

use clausedok_ast::{Block, Clause, Document};

use crate::codec;
use crate::config::MatchMode;
use crate::error::{EditError, Result};
use crate::locate::{find_placeholders, Placeholder};

/// Insert a clause, returning the original content on any failure
///
/// Failures are logged; the operation is all-or-nothing.
pub fn add_clause(content: &str, clause: &Clause, mode: MatchMode) -> String {
    match try_add_clause(content, clause, mode) {
        Ok(updated) => updated,
        Err(e) => {
            e.log("add clause");
            content.to_string()
        }
    }
}

/// Insert a clause into serialized content
pub fn try_add_clause(content: &str, clause: &Clause, mode: MatchMode) -> Result<String> {
    let doc = codec::parse(content)?;
    let fragment = codec::parse_fragment(&clause.content)?;
    let updated = insert_fragment(&doc, &clause.normalized_name(), fragment, mode)?;
    codec::serialize(&updated)
}

/// First placeholder whose name matches the normalized clause name
pub fn find_matching_placeholder(
    doc: &Document,
    clause_key: &str,
    mode: MatchMode,
) -> Option<Placeholder> {
    find_placeholders(doc)
        .into_iter()
        .find(|p| mode.matches(&p.name, clause_key))
}

/// Splice a parsed fragment into a copy of `doc`
///
/// The fragment must contain at least one block.
pub fn insert_fragment(
    doc: &Document,
    clause_key: &str,
    fragment: Document,
    mode: MatchMode,
) -> Result<Document> {
    if fragment.block_count() == 0 {
        return Err(EditError::Structure(
            "clause content has no paragraphs".to_string(),
        ));
    }

    let mut updated = doc.clone();
    match find_matching_placeholder(doc, clause_key, mode) {
        Some(placeholder) => {
            let (si, bi) = placeholder.block_position().ok_or_else(|| {
                EditError::Structure(format!(
                    "placeholder {{{}}} at {} is not inside a paragraph",
                    placeholder.name, placeholder.path
                ))
            })?;
            let blocks = &mut updated
                .sections
                .get_mut(si)
                .ok_or_else(|| EditError::Structure(format!("section {} out of range", si)))?
                .blocks;
            if bi >= blocks.len() {
                return Err(EditError::Structure(format!(
                    "paragraph {} out of range in section {}",
                    bi, si
                )));
            }

            let inserted: Vec<Block> = fragment.into_blocks();
            debug!(
                "Inserting {} paragraph(s) after {{{}}} at section {}, paragraph {}",
                inserted.len(),
                placeholder.name,
                si,
                bi
            );
            blocks.splice(bi + 1..bi + 1, inserted);
        }
        // Appending takes the fragment's first section only
        None => {
            let Some(first) = fragment.sections.into_iter().next() else {
                return Err(EditError::Structure(
                    "clause content has no sections".to_string(),
                ));
            };
            match updated.sections.last_mut() {
                Some(last) => {
                    debug!(
                        "No matching placeholder; appending {} paragraph(s)",
                        first.blocks.len()
                    );
                    last.blocks.extend(first.blocks);
                }
                None => {
                    debug!("Document has no sections; appending the clause section");
                    updated.sections.push(first);
                }
            }
        }
    }

    Ok(updated)
}
