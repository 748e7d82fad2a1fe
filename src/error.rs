// src/error.rs

//! Error types for debrepo

use crate::compression::CompressionError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building a repository
#[derive(Error, Debug)]
pub enum Error {
    /// The package container is malformed or holds no usable control member
    #[error("Format error: {0}")]
    Format(String),

    /// I/O failure on a known path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Control text is not valid UTF-8
    #[error("Control file in {} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: std::str::Utf8Error,
    },

    /// A field required to build an index record is absent
    #[error("Missing required control field: {0}")]
    MissingField(&'static str),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Depiction template failed to render
    #[error("Template error: {0}")]
    Template(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Compression(#[from] CompressionError),
}

impl Error {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using debrepo's Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = Error::io(
            "/tmp/missing.deb",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.deb"));
        assert!(msg.contains("gone"));
    }
}
