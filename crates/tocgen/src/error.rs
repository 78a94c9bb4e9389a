//! CLI error types.

use tocgen_config::ConfigError;
use tocgen_docs::SourceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Report(#[from] serde_json::Error),

    #[error("Directories failed: {0}")]
    Failed(usize),

    #[error("Navigation indices over the hard budget: {0}")]
    Budget(usize),
}
