//! Filesystem document discovery.
//!
//! Discovery is split in two phases. The walk collects candidate files
//! (no content read), then records are built in parallel by reading a
//! bounded prefix of each candidate.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::frontmatter::extract_meta;
use crate::path::titlecase_from_slug;
use crate::record::FileRecord;
use crate::source::{DocumentSource, SourceError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Bytes read from each document; enough for typical leading metadata.
const PREFIX_BYTES: u64 = 8192;

/// Directory names that hold build output rather than documentation.
const ARTIFACT_DIRS: &[&str] = &[
    "target",
    "node_modules",
    "build",
    "dist",
    "_build",
    "__pycache__",
];

/// Walk a tree and yield `(relative path, absolute path)` for every file.
///
/// Hidden entries (including version-control directories) and build
/// artifact directories are skipped. Entries are visited in file name
/// order. Walk errors (e.g., permission denied) skip the entry.
pub fn walk_tree(root: &Path) -> impl Iterator<Item = (String, PathBuf)> {
    let root_owned = root.to_path_buf();
    WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            let name = entry.file_name().to_string_lossy();
            !(is_dir && ARTIFACT_DIRS.contains(&&*name))
        })
        .build()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| tracing::debug!(error = %e, "Skipping unreadable entry"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter_map(move |entry| {
            let rel = relative_path(entry.path(), &root_owned)?;
            Some((rel, entry.into_path()))
        })
}

/// Convert an absolute path under `root` to a `/`-separated relative path.
fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Filesystem document source.
///
/// Finds every file with the configured extension under the tree root,
/// skipping designated non-documentation filenames (e.g., the generated
/// index files themselves).
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tocgen_docs::{DocumentIndex, FsSource};
///
/// let source = FsSource::new(PathBuf::from("docs")).with_excluded_names(["INDEX.md"]);
/// let index = DocumentIndex::from_sources(&[&source])?;
/// ```
pub struct FsSource {
    /// Root directory of the tree.
    root: PathBuf,
    /// Topic document extension without the dot.
    extension: String,
    /// Filenames never treated as topic documents.
    excluded_names: HashSet<String>,
}

impl FsSource {
    /// Create a source for `.md` documents under `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extension: "md".to_owned(),
            excluded_names: HashSet::new(),
        }
    }

    /// Use a different topic document extension.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        extension
            .trim_start_matches('.')
            .clone_into(&mut self.extension);
        self
    }

    /// Add designated non-documentation filenames.
    #[must_use]
    pub fn with_excluded_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether a discovered file is a topic document candidate.
    fn is_candidate(&self, rel_path: &str) -> bool {
        let name = crate::path::file_name(rel_path);
        !self.excluded_names.contains(name)
            && Path::new(name)
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(self.extension.as_str()))
    }

    /// Build a record by reading the document prefix.
    ///
    /// Returns `None` if the file cannot be read.
    fn build_record(rel_path: String, abs_path: PathBuf) -> Option<FileRecord> {
        let prefix = read_prefix(&abs_path)
            .inspect_err(|e| {
                tracing::debug!(path = %rel_path, error = %e, "Failed to read document, skipping");
            })
            .ok()?;
        let meta = extract_meta(&prefix);
        let title = meta
            .title
            .unwrap_or_else(|| derive_title_from_filename(&abs_path));

        Some(FileRecord {
            path: rel_path,
            abs_path,
            title,
            description: meta.description,
            category: meta.category,
        })
    }
}

impl DocumentSource for FsSource {
    fn discover(&self) -> Result<Vec<FileRecord>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::not_found(&self.root).with_backend(BACKEND));
        }

        let candidates: Vec<_> = walk_tree(&self.root)
            .filter(|(rel, _)| self.is_candidate(rel))
            .collect();

        Ok(candidates
            .into_par_iter()
            .filter_map(|(rel, abs)| Self::build_record(rel, abs))
            .collect())
    }
}

/// Read at most [`PREFIX_BYTES`] of a file as (lossy) UTF-8.
fn read_prefix(path: &Path) -> std::io::Result<String> {
    let mut buf = Vec::new();
    fs::File::open(path)?
        .take(PREFIX_BYTES)
        .read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Generate title from a file path's filename.
fn derive_title_from_filename(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|s| titlecase_from_slug(&s.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_source_is_send_sync() {
        assert_send_sync::<FsSource>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn discover(source: &FsSource) -> Vec<FileRecord> {
        source.discover().unwrap()
    }

    #[test]
    fn test_discover_missing_root() {
        let source = FsSource::new(PathBuf::from("/nonexistent/tocgen"));
        let err = source.discover().unwrap_err();
        assert_eq!(err.kind, SourceErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp_dir = create_test_dir();
        let source = FsSource::new(temp_dir.path().to_path_buf());
        assert!(discover(&source).is_empty());
    }

    #[test]
    fn test_discover_nested_structure() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# User Guide\n").unwrap();
        let domain = temp_dir.path().join("domain").join("billing");
        fs::create_dir_all(&domain).unwrap();
        fs::write(domain.join("api.md"), "# Billing API\n").unwrap();
        fs::write(domain.join("notes.txt"), "not a topic").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let records = discover(&source);

        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["domain/billing/api.md", "guide.md"]);
        assert_eq!(records[0].title, "Billing API");
        assert_eq!(records[0].dir(), "domain/billing");
        assert!(records[0].abs_path.ends_with("domain/billing/api.md"));
    }

    #[test]
    fn test_discover_reads_metadata_block() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("setup.md"),
            "---\ntitle: Install Everything\ndescription: \"Step by step\"\ncategory: ops\n---\n# Other\n",
        )
        .unwrap();

        let records = discover(&FsSource::new(temp_dir.path().to_path_buf()));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Install Everything");
        assert_eq!(records[0].description.as_deref(), Some("Step by step"));
        assert_eq!(records[0].category.as_deref(), Some("ops"));
    }

    #[test]
    fn test_discover_falls_back_to_filename() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("Setup-Guide.md"),
            "Content without heading.",
        )
        .unwrap();

        let records = discover(&FsSource::new(temp_dir.path().to_path_buf()));

        assert_eq!(records[0].title, "Setup Guide");
    }

    #[test]
    fn test_discover_skips_hidden_and_artifact_dirs() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        for dir in [".git", "node_modules", "target", "build"] {
            let path = temp_dir.path().join(dir);
            fs::create_dir(&path).unwrap();
            fs::write(path.join("inner.md"), "# Inner").unwrap();
        }

        let records = discover(&FsSource::new(temp_dir.path().to_path_buf()));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "visible.md");
    }

    #[test]
    fn test_discover_skips_excluded_names() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("INDEX.md"), "# Generated").unwrap();
        fs::write(temp_dir.path().join("INDEX-EXTENDED.md"), "# Generated").unwrap();
        fs::write(temp_dir.path().join("topic.md"), "# Topic").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf())
            .with_excluded_names(["INDEX.md", "INDEX-EXTENDED.md"]);
        let records = discover(&source);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "topic.md");
    }

    #[test]
    fn test_discover_custom_extension() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.txt"), "# Text Topic").unwrap();
        fs::write(temp_dir.path().join("b.md"), "# Markdown").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf()).with_extension(".txt");
        let records = discover(&source);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Text Topic");
    }

    #[test]
    fn test_root_named_like_artifact_is_walked() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path().join("build");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("topic.md"), "# Topic").unwrap();

        let records = discover(&FsSource::new(root));

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_prefix_is_bounded() {
        let temp_dir = create_test_dir();
        let mut content = "x\n".repeat(10_000);
        content.push_str("# Too Late\n");
        fs::write(temp_dir.path().join("long-topic.md"), content).unwrap();

        let records = discover(&FsSource::new(temp_dir.path().to_path_buf()));

        assert_eq!(records[0].title, "Long Topic");
    }

    #[test]
    fn test_walk_tree_relative_paths() {
        let temp_dir = create_test_dir();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("_index.yaml"), "title: B").unwrap();

        let files: Vec<_> = walk_tree(temp_dir.path()).map(|(rel, _)| rel).collect();

        assert_eq!(files, vec!["a/b/_index.yaml"]);
    }
}
