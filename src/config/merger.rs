//! Reconcile scanned update entries with a configuration document

use crate::config::document::ConfigDocument;
use crate::domain::{Update, UpdateSet};
use crate::error::DocumentError;

/// Result of merging candidates into a document
#[derive(Debug)]
pub struct Merged<D> {
    /// The document with new entries appended
    pub document: D,
    /// Entries that were appended, sorted by key
    pub added: Vec<Update>,
    /// Candidates that were already declared in the document
    pub already_declared: usize,
}

impl<D> Merged<D> {
    /// True when the document was changed
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Append every candidate the document does not already declare
///
/// Identity is `(ecosystem, directory)`, so entries the user already has,
/// in any order and with any schedule, are left exactly as written. Running
/// the merge again on its own output adds nothing.
pub fn merge<D: ConfigDocument>(
    mut document: D,
    mut candidates: UpdateSet,
) -> Result<Merged<D>, DocumentError> {
    let mut already_declared = 0;
    for declared in document.declared_updates()? {
        if candidates.remove_if_present(&declared) {
            tracing::debug!("{} already declared", declared);
            already_declared += 1;
        }
    }

    let added = candidates.to_ordered_list();
    if !added.is_empty() {
        document.append_updates(&added)?;
    }
    tracing::info!(
        "{} new update entries, {} already declared",
        added.len(),
        already_declared
    );

    Ok(Merged {
        document,
        added,
        already_declared,
    })
}
