//! # Error Types

use crate::split::DatasetSplit;

/// Errors from captionkit operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptionKitError {
    /// A positional lookup past the end of a split.
    #[error("index {index} out of range for {split} split of {len} images")]
    IndexOutOfRange {
        /// The split that was indexed.
        split: DatasetSplit,
        /// The requested position.
        index: usize,
        /// The number of images in the split.
        len: usize,
    },

    /// Reference and hypothesis image ids differ.
    #[error("reference and hypothesis image ids differ: {0}")]
    KeyMismatch(String),

    /// The scoring collaborator broke its line protocol.
    #[error("scorer protocol error: {0}")]
    Protocol(String),

    /// Parse error (numbers, enum names, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for captionkit operations.
pub type CKResult<T> = core::result::Result<T, CaptionKitError>;
