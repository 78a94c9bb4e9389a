//! Directory-keyed customization table.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tocgen_docs::path::{ancestor_chain, join, move_up, parent_dir, strip_dir};
use tocgen_docs::walk_tree;

use crate::customization::{
    Customization, CustomizationError, Guidance, NodeOverride, RelatedTopic, SectionDefinition,
};

/// Customization document that failed to load.
#[derive(Debug)]
pub struct RejectedCustomization {
    /// Directory the document belongs to.
    pub dir: String,
    /// Absolute path of the document.
    pub path: PathBuf,
    /// Why it was rejected.
    pub error: CustomizationError,
}

/// Read-only table of customizations keyed by directory.
///
/// Built once per run. Directories whose document failed to load behave as
/// if they had no customization; the failures are kept for reporting.
#[derive(Debug, Default)]
pub struct CustomizationStore {
    entries: BTreeMap<String, Customization>,
    rejected: Vec<RejectedCustomization>,
}

impl CustomizationStore {
    /// Discover every customization document named `file_name` under `root`.
    ///
    /// Uses the same skip rules as document discovery. Malformed documents
    /// are logged and recorded in [`CustomizationStore::rejected`].
    #[must_use]
    pub fn discover(root: &Path, file_name: &str) -> Self {
        let mut store = Self::default();

        for (rel, abs) in walk_tree(root) {
            if tocgen_docs::path::file_name(&rel) != file_name {
                continue;
            }
            let dir = parent_dir(&rel).to_owned();
            match load(&abs) {
                Ok(custom) => {
                    tracing::debug!(dir = %dir, "Loaded customization");
                    store.entries.insert(dir, custom);
                }
                Err(error) => {
                    tracing::warn!(
                        path = %abs.display(),
                        error = %error,
                        "Ignoring malformed customization"
                    );
                    store.rejected.push(RejectedCustomization {
                        dir,
                        path: abs,
                        error,
                    });
                }
            }
        }

        store
    }

    /// Build a store from already-parsed customizations.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Customization)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    /// Customization for a directory.
    #[must_use]
    pub fn get(&self, dir: &str) -> Option<&Customization> {
        self.entries.get(dir)
    }

    /// Iterate customizations in directory order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Customization)> {
        self.entries.iter().map(|(dir, custom)| (dir.as_str(), custom))
    }

    /// Documents that failed to load.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedCustomization] {
        &self.rejected
    }

    /// Number of loaded customizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no customization was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a document is excluded by a filter.
    ///
    /// Every ancestor from the root down to the document's own directory is
    /// consulted. A filter entry matches when it is a prefix of the document
    /// path relative to the declaring directory.
    #[must_use]
    pub fn is_filtered(&self, doc_path: &str) -> bool {
        self.ancestors_with_custom(parent_dir(doc_path))
            .any(|(ancestor, custom)| {
                let Some(rel) = strip_dir(doc_path, &ancestor) else {
                    return false;
                };
                custom
                    .filter
                    .iter()
                    .map(|f| f.trim_start_matches("./").trim_start_matches('/'))
                    .any(|prefix| !prefix.is_empty() && rel.starts_with(prefix))
            })
    }

    /// Override declared for `file_name` by the customization of `dir`.
    #[must_use]
    pub fn node_override(&self, dir: &str, file_name: &str) -> Option<&NodeOverride> {
        self.get(dir)?.nodes.get(file_name)
    }

    /// Effective directory of a promoted document.
    ///
    /// Returns `None` when no rule matches. Only the document path is
    /// consulted, so applying promotion twice gives the same result.
    #[must_use]
    pub fn promoted_dir(&self, doc_path: &str) -> Option<String> {
        let own_dir = parent_dir(doc_path);
        for (ancestor, custom) in self.ancestors_with_custom(own_dir) {
            let Some(rel) = strip_dir(doc_path, &ancestor) else {
                continue;
            };
            if let Some(rule) = custom.promote.iter().find(|rule| rule.matches(rel)) {
                let target = move_up(own_dir, rule.levels).to_owned();
                tracing::debug!(path = %doc_path, to = %target, "Promoting document");
                return Some(target);
            }
        }
        None
    }

    /// Offers declared by a directory.
    #[must_use]
    pub fn offers(&self, dir: &str) -> &[String] {
        self.get(dir).map_or(&[], |c| c.offers.as_slice())
    }

    /// Curated sections declared by a directory.
    #[must_use]
    pub fn sections(&self, dir: &str) -> &[SectionDefinition] {
        self.get(dir).map_or(&[], |c| c.sections.as_slice())
    }

    /// Guidance block of a directory.
    #[must_use]
    pub fn guidance(&self, dir: &str) -> Option<&Guidance> {
        self.get(dir)?.guidance.as_ref()
    }

    /// Related topics of a directory.
    #[must_use]
    pub fn related(&self, dir: &str) -> &[RelatedTopic] {
        self.get(dir).map_or(&[], |c| c.related.as_slice())
    }

    /// Short description for parent listings (falls back to description).
    #[must_use]
    pub fn short_description(&self, dir: &str) -> Option<&str> {
        self.get(dir)?.listing_description()
    }

    /// Ancestors of `dir` (root first, `dir` included) that have a customization.
    fn ancestors_with_custom<'a>(
        &'a self,
        dir: &str,
    ) -> impl Iterator<Item = (String, &'a Customization)> + 'a {
        ancestor_chain(dir)
            .into_iter()
            .filter_map(|ancestor| {
                let custom = self.entries.get(&ancestor)?;
                Some((ancestor, custom))
            })
    }
}

fn load(path: &Path) -> Result<Customization, CustomizationError> {
    let content = fs::read_to_string(path)?;
    Customization::from_yaml(&content)
}

/// Root-relative path named by an entry relative to `dir`.
///
/// Returns `None` when the entry escapes the tree root.
#[must_use]
pub fn resolve_relative(dir: &str, entry: &str) -> Option<String> {
    tocgen_docs::path::normalize(&join(dir, entry))
}
