//! Link targets for generated documents.

use tocgen_docs::path::{join, relative_link};

/// Builds link targets from a generated document to tree paths.
///
/// Links are relative to the generated document's directory, or absolute
/// (`{base_url}/{path}`) when a base URL is configured.
#[derive(Clone, Debug, Default)]
pub struct LinkBuilder {
    base_url: Option<String>,
}

impl LinkBuilder {
    /// Create a link builder. `base_url` must not end with `/`.
    #[must_use]
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// Link from a document in `from_dir` to the root-relative `target`.
    #[must_use]
    pub fn href(&self, from_dir: &str, target: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/{target}"),
            None => relative_link(from_dir, target),
        }
    }

    /// Link from a document in `from_dir` to the index `index_name` of `dir`.
    #[must_use]
    pub fn index_href(&self, from_dir: &str, dir: &str, index_name: &str) -> String {
        self.href(from_dir, &join(dir, index_name))
    }
}
