//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dataset-io operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Directory does not exist or cannot be listed
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Mesh path has no recognized format marker
    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Mesh decode failed
    #[error("Mesh I/O failed for {path}: {reason}")]
    MeshIo { path: PathBuf, reason: String },

    /// Mesh body is malformed
    #[error("Malformed mesh: {0}")]
    Mesh(String),

    /// Binary record is truncated or dimension-mismatched
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Document file cannot be opened or read
    #[error("failed to read file {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest filename does not carry a `.json` extension
    #[error("Invalid manifest name: {0} (expected .json)")]
    InvalidManifestName(String),

    /// Manifest content violates the catalog contract
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create a malformed mesh error.
    pub fn mesh(msg: impl Into<String>) -> Self {
        Self::Mesh(msg.into())
    }

    /// Map an open failure on `path` to `FileNotFound` or `Io`.
    pub(crate) fn open_failed(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.into())
        } else {
            Self::Io(err)
        }
    }
}

/// Result type alias for dataset-io operations.
pub type Result<T> = std::result::Result<T, Error>;
