//! Error types for fbx2gltf-batch
//!
//! Conversion itself never fails with an error: launch failures, nonzero exits and
//! malformed options all end up as log lines and per-file results in the
//! [`BatchSummary`](crate::types::BatchSummary). The errors here belong to the host
//! side of the boundary, before a batch starts:
//! - Loading and validating configuration files
//! - Discovering input files on disk

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fbx2gltf-batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fbx2gltf-batch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "event_buffer_size")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input path passed by the host does not exist
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Directory traversal failed while discovering input files
    #[error("failed to scan {}: {reason}", path.display())]
    Discovery {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying walk error
        reason: String,
    },
}
