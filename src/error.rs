//! Error types shared by the cache, lookup and repository layers

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TldrError>;

/// Errors produced while maintaining the page cache or resolving a page
#[derive(Debug, Error)]
pub enum TldrError {
    /// The cache root (or another configured value) cannot be used
    #[error("invalid cache configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A download failed or the remote answered with a non-success status
    #[error("failed to download {url}: {message}")]
    Transport { url: String, message: String },

    /// The downloaded archive could not be read
    #[error("failed to decode page archive: {0}")]
    Decode(String),

    /// Reading or writing cache content failed
    #[error("cache I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No page matched the query
    #[error("no page found for '{command}'")]
    NotFound { command: String },
}

impl TldrError {
    pub fn config(message: impl Into<String>) -> Self {
        TldrError::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TldrError::Io {
            path: path.into(),
            source,
        }
    }

    /// NotFound is an expected outcome rather than a failure of the cache
    pub fn is_not_found(&self) -> bool {
        matches!(self, TldrError::NotFound { .. })
    }
}

impl From<zip::result::ZipError> for TldrError {
    fn from(err: zip::result::ZipError) -> Self {
        TldrError::Decode(err.to_string())
    }
}
