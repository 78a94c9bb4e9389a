//! File records and the global document index.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::path;
use crate::source::{DocumentSource, SourceError};

/// A discovered topic document.
///
/// Identity is `path`, relative to the tree root (e.g., `"guides/setup.md"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the tree root.
    pub path: String,
    /// Absolute path on disk.
    pub abs_path: PathBuf,
    /// Display title (metadata > first H1 > title-cased filename).
    pub title: String,
    /// Description from leading metadata.
    pub description: Option<String>,
    /// Category label from leading metadata.
    pub category: Option<String>,
}

impl FileRecord {
    /// Directory containing this document.
    #[must_use]
    pub fn dir(&self) -> &str {
        path::parent_dir(&self.path)
    }

    /// Base filename (e.g., `"setup.md"`).
    #[must_use]
    pub fn file_name(&self) -> &str {
        path::file_name(&self.path)
    }
}

/// Path-keyed index of every discovered topic document.
///
/// Built once per run and read-only afterwards. Iteration is in path order.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    records: BTreeMap<String, FileRecord>,
}

impl DocumentIndex {
    /// Build an index from records. The first record for a path wins.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            if map.contains_key(&record.path) {
                tracing::debug!(path = %record.path, "Duplicate document record, keeping first");
                continue;
            }
            map.insert(record.path.clone(), record);
        }
        Self { records: map }
    }

    /// Build an index from several sources, in priority order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceError`] raised by a source.
    pub fn from_sources(sources: &[&dyn DocumentSource]) -> Result<Self, SourceError> {
        let mut records = Vec::new();
        for source in sources {
            records.extend(source.discover()?);
        }
        Ok(Self::from_records(records))
    }

    /// Look up a document by relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.get(path)
    }

    /// Iterate all documents in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, title: &str) -> FileRecord {
        FileRecord {
            path: path.to_owned(),
            abs_path: PathBuf::from("/docs").join(path),
            title: title.to_owned(),
            description: None,
            category: None,
        }
    }

    #[test]
    fn test_record_dir_and_file_name() {
        let rec = record("guides/install/setup.md", "Setup");
        assert_eq!(rec.dir(), "guides/install");
        assert_eq!(rec.file_name(), "setup.md");

        let top = record("readme.md", "Readme");
        assert_eq!(top.dir(), "");
    }

    #[test]
    fn test_from_records_first_wins() {
        let index = DocumentIndex::from_records([
            record("a.md", "First"),
            record("a.md", "Second"),
            record("b.md", "B"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a.md").unwrap().title, "First");
    }

    #[test]
    fn test_iter_is_path_ordered() {
        let index = DocumentIndex::from_records([
            record("z.md", "Z"),
            record("a/b.md", "B"),
            record("a.md", "A"),
        ]);
        let paths: Vec<_> = index.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.md", "a/b.md", "z.md"]);
    }

    #[test]
    fn test_empty_index() {
        let index = DocumentIndex::default();
        assert!(index.is_empty());
        assert!(index.get("anything.md").is_none());
    }
}
