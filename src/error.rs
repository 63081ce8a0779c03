// src/error.rs

//! Error types for pkggraph

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the inventory library
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An archive could not be opened or carries no usable `.PKGINFO`
    #[error("Malformed archive {}: {reason}", path.display())]
    MalformedArchive { path: PathBuf, reason: String },

    /// A recipe record violates the non-empty `names` contract
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::MalformedArchive`] for `path`
    pub fn malformed_archive(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedArchive {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
