//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more scripts failed `check`
    #[error("{failed} of {total} script(s) failed")]
    CheckFailed {
        /// Scripts that failed
        failed: usize,
        /// Scripts checked
        total: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Script could not be loaded
    #[error("Script error: {0}")]
    Script(#[from] probar_replay::ConfigError),

    /// Output serialization failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    /// Create a check failure error
    #[must_use]
    pub const fn check_failed(failed: usize, total: usize) -> Self {
        Self::CheckFailed { failed, total }
    }
}
