//! Error types for the staging module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while downloading artwork or writing staged files.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Source file not found.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Failed to create a directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy a file.
    #[error("Failed to copy file from {from} to {to}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Copy verification failed.
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to build a zip archive.
    #[error("Failed to archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Download request failed.
    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    /// Download returned a non-success status.
    #[error("Download of {url} returned HTTP {status}")]
    DownloadStatus { url: String, status: u16 },

    /// Artwork descriptor did not contain a file URL.
    #[error("Artwork descriptor at {url} has no file url")]
    MissingFileUrl { url: String },

    /// Download timed out.
    #[error("Download of {url} timed out")]
    Timeout { url: String },

    /// Blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    TaskFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StagingError {
    /// Creates a copy failed error.
    pub fn copy_failed(from: PathBuf, to: PathBuf, error: std::io::Error) -> Self {
        Self::CopyFailed { from, to, error }
    }

    /// Whether this error came from talking to the order API.
    pub fn is_download(&self) -> bool {
        matches!(
            self,
            Self::Download { .. }
                | Self::DownloadStatus { .. }
                | Self::MissingFileUrl { .. }
                | Self::Timeout { .. }
        )
    }
}
