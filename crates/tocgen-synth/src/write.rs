//! Persisting generated documents.

use std::fs;
use std::path::{Path, PathBuf};

use tocgen_docs::path::join;

use crate::document::{DocumentKind, GeneratedDocument};
use crate::error::{DirFailure, SynthError};

/// Writes generated documents into the tree or a mirror directory.
#[derive(Clone, Debug)]
pub struct DocumentWriter {
    target_root: PathBuf,
}

/// Result of writing one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was created or its content changed.
    Written,
    /// File already had the same content.
    Unchanged,
}

impl DocumentWriter {
    /// Write next to the topic documents under `tree_root`.
    #[must_use]
    pub fn in_tree(tree_root: &Path) -> Self {
        Self {
            target_root: tree_root.to_path_buf(),
        }
    }

    /// Mirror the tree layout under `output_dir`.
    #[must_use]
    pub fn mirrored(output_dir: &Path) -> Self {
        Self {
            target_root: output_dir.to_path_buf(),
        }
    }

    /// Absolute target of a root-relative output path.
    #[must_use]
    pub fn target(&self, rel_path: &str) -> PathBuf {
        rel_path
            .split('/')
            .fold(self.target_root.clone(), |acc, part| acc.join(part))
    }

    /// Write one document, skipping files whose content is unchanged.
    pub fn write(&self, doc: &GeneratedDocument) -> Result<WriteOutcome, SynthError> {
        let path = self.target(&doc.path);
        let io_err = |source| SynthError::Write {
            path: path.clone(),
            source,
        };

        if fs::read_to_string(&path).is_ok_and(|existing| existing == doc.content) {
            tracing::debug!(path = %doc.path, "Unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, &doc.content).map_err(io_err)?;
        tracing::debug!(path = %doc.path, lines = doc.lines, "Wrote index");
        Ok(WriteOutcome::Written)
    }

    /// Remove an extended index left over from a previous run.
    ///
    /// Called for directories whose primary index no longer overflows.
    /// Returns whether a file was removed.
    pub fn remove_stale_overflow(&self, dir: &str, overflow_name: &str) -> Result<bool, SynthError> {
        let path = self.target(&join(dir, overflow_name));
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| SynthError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Removed stale extended index");
        Ok(true)
    }
}

/// Counts of a [`DocumentWriter::write_all`] pass.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Files created or changed.
    pub written: usize,
    /// Files already up to date.
    pub unchanged: usize,
    /// Stale extended indices removed.
    pub removed: usize,
    /// Directories whose output could not be written.
    pub failures: Vec<DirFailure>,
}

impl DocumentWriter {
    /// Write every document and prune stale extended indices.
    ///
    /// A failing directory does not stop the others.
    pub fn write_all(&self, documents: &[GeneratedDocument], overflow_name: &str) -> WriteSummary {
        let mut summary = WriteSummary::default();

        for doc in documents {
            match self.write(doc) {
                Ok(WriteOutcome::Written) => summary.written += 1,
                Ok(WriteOutcome::Unchanged) => summary.unchanged += 1,
                Err(error) => {
                    tracing::warn!(dir = %doc.dir, error = %error, "Failed to write index");
                    summary.failures.push(DirFailure {
                        dir: doc.dir.clone(),
                        error,
                    });
                }
            }
        }

        for dir in dirs_without_overflow(documents) {
            match self.remove_stale_overflow(dir, overflow_name) {
                Ok(true) => summary.removed += 1,
                Ok(false) => {}
                Err(error) => summary.failures.push(DirFailure {
                    dir: dir.to_owned(),
                    error,
                }),
            }
        }

        summary
    }
}

/// Directories that produced an index but no extended index.
#[must_use]
pub fn dirs_without_overflow(documents: &[GeneratedDocument]) -> Vec<&str> {
    documents
        .iter()
        .filter(|d| d.kind != DocumentKind::Overflow)
        .filter(|d| {
            !documents
                .iter()
                .any(|o| o.kind == DocumentKind::Overflow && o.dir == d.dir)
        })
        .map(|d| d.dir.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(dir: &str, kind: DocumentKind, name: &str, content: &str) -> GeneratedDocument {
        GeneratedDocument {
            dir: dir.to_owned(),
            kind,
            path: join(dir, name),
            content: content.to_owned(),
            lines: content.lines().count(),
            leaf: false,
        }
    }

    #[test]
    fn test_write_in_tree_creates_and_skips_unchanged() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = DocumentWriter::in_tree(temp_dir.path());
        let generated = doc("a/b", DocumentKind::Primary, "INDEX.md", "# B\n");

        assert_eq!(writer.write(&generated).unwrap(), WriteOutcome::Written);
        assert_eq!(writer.write(&generated).unwrap(), WriteOutcome::Unchanged);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("a/b/INDEX.md")).unwrap(),
            "# B\n"
        );
    }

    #[test]
    fn test_write_mirrored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("out");
        let writer = DocumentWriter::mirrored(&out);

        writer
            .write(&doc("", DocumentKind::Navigation, "INDEX.md", "# Root\n"))
            .unwrap();

        assert!(out.join("INDEX.md").is_file());
    }

    #[test]
    fn test_write_error_carries_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("blocker"), "file").unwrap();
        let writer = DocumentWriter::in_tree(temp_dir.path());

        let err = writer
            .write(&doc("blocker", DocumentKind::Primary, "INDEX.md", "# X\n"))
            .unwrap_err();

        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_remove_stale_overflow() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("a")).unwrap();
        fs::write(temp_dir.path().join("a/INDEX-EXTENDED.md"), "old").unwrap();
        let writer = DocumentWriter::in_tree(temp_dir.path());

        assert!(writer.remove_stale_overflow("a", "INDEX-EXTENDED.md").unwrap());
        assert!(!writer.remove_stale_overflow("a", "INDEX-EXTENDED.md").unwrap());
    }

    #[test]
    fn test_write_all_continues_after_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("blocker"), "file").unwrap();
        fs::create_dir(temp_dir.path().join("ok")).unwrap();
        fs::write(temp_dir.path().join("ok/INDEX-EXTENDED.md"), "stale").unwrap();
        let writer = DocumentWriter::in_tree(temp_dir.path());
        let docs = [
            doc("blocker", DocumentKind::Primary, "INDEX.md", "# X\n"),
            doc("ok", DocumentKind::Primary, "INDEX.md", "# Ok\n"),
        ];

        let summary = writer.write_all(&docs, "INDEX-EXTENDED.md");

        assert_eq!(summary.written, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].dir, "blocker");
        assert!(!temp_dir.path().join("ok/INDEX-EXTENDED.md").exists());
    }

    #[test]
    fn test_dirs_without_overflow() {
        let docs = [
            doc("a", DocumentKind::Primary, "INDEX.md", ""),
            doc("a", DocumentKind::Overflow, "INDEX-EXTENDED.md", ""),
            doc("b", DocumentKind::Primary, "INDEX.md", ""),
            doc("c", DocumentKind::Navigation, "INDEX.md", ""),
        ];
        assert_eq!(dirs_without_overflow(&docs), vec!["b", "c"]);
    }
}
