//! Topic document discovery and indexing for tocgen.
//!
//! This crate builds the [`DocumentIndex`]: a path-keyed, read-only map of
//! every topic document under a tree root. It provides:
//!
//! - [`DocumentSource`] trait, the seam between discovery backends and the index
//! - [`FsSource`] filesystem walker with bounded-prefix metadata extraction
//! - [`MockSource`] for testing (behind `mock` feature flag)
//! - [`path`] helpers for root-relative `/`-separated paths
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tocgen_docs::{DocumentIndex, FsSource};
//!
//! let source = FsSource::new(PathBuf::from("docs"));
//! let index = DocumentIndex::from_sources(&[&source])?;
//! for record in index.iter() {
//!     println!("{}: {}", record.path, record.title);
//! }
//! ```

mod frontmatter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
pub mod path;
mod record;
mod source;

pub use frontmatter::{DocumentMeta, extract_meta};
pub use fs::{FsSource, walk_tree};
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use record::{DocumentIndex, FileRecord};
pub use source::{DocumentSource, SourceError, SourceErrorKind};
