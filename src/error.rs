// src/error.rs

//! Error types for the wolfi-dev helper tool

use thiserror::Error;

/// Result type for wolfi-dev operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a helper workflow
#[derive(Error, Debug)]
pub enum Error {
    /// Required identity or environment value is missing
    #[error("configuration error: {0}")]
    Config(String),

    /// Required argument is missing or malformed
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Artifact already exists at the destination
    #[error("conflict: {0}")]
    Conflict(String),

    /// No candidate source location resolved
    #[error("not found: {0}")]
    NotFound(String),

    /// A required external tool is not installed
    #[error("missing tool: {0} (install it and re-run)")]
    MissingTool(String),

    /// An external tool exited non-zero
    #[error("{tool} failed ({status}): {stderr}")]
    External {
        /// Program that failed
        tool: String,
        /// Exit status description ("exit code N" or "killed by signal")
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// HTTP probe or download failed at the transport level
    #[error("HTTP error: {0}")]
    Http(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Package definition could not be parsed as YAML
    #[error("definition parse error: {0}")]
    Definition(#[from] serde_norway::Error),
}

impl Error {
    /// True for errors a user can fix and retry (bad argument, missing
    /// fork, existing package, absent identity, uninstalled tool).
    /// Drives the exit code split in `main`.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::Validation(_)
                | Error::Conflict(_)
                | Error::NotFound(_)
                | Error::MissingTool(_)
                | Error::External { .. }
        )
    }
}
