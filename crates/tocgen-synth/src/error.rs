//! Error types for index synthesis.

use std::path::PathBuf;

/// Failure to persist a directory's output.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Generated document could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Synthesis failure attributed to one directory.
#[derive(Debug)]
pub struct DirFailure {
    /// Directory that produced no (or incomplete) output.
    pub dir: String,
    /// What went wrong.
    pub error: SynthError,
}
