//! Error types for the JSON codec.

use thiserror::Error;

/// Errors that can occur while encoding protocol lines.
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
