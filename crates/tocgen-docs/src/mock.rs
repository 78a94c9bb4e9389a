//! Mock document source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::path::PathBuf;

use crate::record::FileRecord;
use crate::source::{DocumentSource, SourceError, SourceErrorKind};

/// In-memory document source.
///
/// # Example
///
/// ```ignore
/// use tocgen_docs::{DocumentIndex, MockSource};
///
/// let source = MockSource::new()
///     .with_document("guide/setup.md", "Setup")
///     .with_described("guide/api.md", "API", "Endpoint reference");
/// let index = DocumentIndex::from_sources(&[&source]).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    records: Vec<FileRecord>,
    fail: bool,
}

impl MockSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given path and title.
    #[must_use]
    pub fn with_document(self, path: &str, title: &str) -> Self {
        self.with_record(path, title, None)
    }

    /// Add a document with a description.
    #[must_use]
    pub fn with_described(self, path: &str, title: &str, description: &str) -> Self {
        self.with_record(path, title, Some(description))
    }

    /// Add `count` untitled documents named `topic-<n>.md` under `dir`.
    #[must_use]
    pub fn with_topics(mut self, dir: &str, count: usize) -> Self {
        for n in 1..=count {
            let path = crate::path::join(dir, &format!("topic-{n}.md"));
            self = self.with_document(&path, &format!("Topic {n}"));
        }
        self
    }

    /// Make [`DocumentSource::discover`] fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn with_record(mut self, path: &str, title: &str, description: Option<&str>) -> Self {
        self.records.push(FileRecord {
            path: path.to_owned(),
            abs_path: PathBuf::from("/mock").join(path),
            title: title.to_owned(),
            description: description.map(str::to_owned),
            category: None,
        });
        self
    }
}

impl DocumentSource for MockSource {
    fn discover(&self) -> Result<Vec<FileRecord>, SourceError> {
        if self.fail {
            return Err(SourceError::new(SourceErrorKind::Other).with_backend("Mock"));
        }
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentIndex;

    #[test]
    fn test_mock_source_feeds_index() {
        let source = MockSource::new()
            .with_document("a.md", "A")
            .with_described("b/c.md", "C", "Nested")
            .with_topics("d", 2);

        let index = DocumentIndex::from_sources(&[&source]).unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.get("b/c.md").unwrap().description.as_deref(), Some("Nested"));
        assert_eq!(index.get("d/topic-2.md").unwrap().title, "Topic 2");
    }

    #[test]
    fn test_sources_in_priority_order() {
        let primary = MockSource::new().with_document("a.md", "Primary");
        let legacy = MockSource::new()
            .with_document("a.md", "Legacy")
            .with_document("old.md", "Old");

        let index = DocumentIndex::from_sources(&[&primary, &legacy]).unwrap();

        assert_eq!(index.get("a.md").unwrap().title, "Primary");
        assert!(index.get("old.md").is_some());
    }

    #[test]
    fn test_failing_source_propagates() {
        let source = MockSource::new().failing();
        let err = DocumentIndex::from_sources(&[&source]).unwrap_err();
        assert_eq!(err.backend, Some("Mock"));
    }
}
