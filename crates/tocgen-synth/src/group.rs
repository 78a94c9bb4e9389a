//! Directory grouping.
//!
//! Assigns every indexed document to its effective directory: the
//! directory promotion moves it to, or the one containing it. Filtered
//! documents are left out of every group but remain in the global index,
//! so curated sections can still include them.

use std::collections::BTreeMap;

use tocgen_custom::CustomizationStore;
use tocgen_docs::DocumentIndex;

/// Documents keyed by effective directory, each list in path order.
pub type Groups = BTreeMap<String, Vec<String>>;

/// Group indexed documents by effective directory.
#[must_use]
pub fn group_documents(index: &DocumentIndex, store: &CustomizationStore) -> Groups {
    let mut groups = Groups::new();

    for record in index.iter() {
        if store.is_filtered(&record.path) {
            tracing::debug!(path = %record.path, "Document filtered out");
            continue;
        }
        let dir = store
            .promoted_dir(&record.path)
            .unwrap_or_else(|| record.dir().to_owned());
        groups.entry(dir).or_default().push(record.path.clone());
    }

    groups
}
