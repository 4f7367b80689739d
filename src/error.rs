//! Error types for org-capture

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for org-capture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in org-capture
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {} after {written} bytes: {source}", path.display())]
    Write {
        path: PathBuf,
        written: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Bytes that reached the file before the failure
    pub fn bytes_written(&self) -> usize {
        match self {
            Self::Write { written, .. } => *written,
            _ => 0,
        }
    }
}
