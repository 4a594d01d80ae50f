//! Error types for record generation.

use loadgen_json::CodecError;
use thiserror::Error;

/// Error type for generator operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Generator settings that can never produce a valid run
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The id marker could not be located exactly once in the sample record
    #[error("Template marker '{marker}' found {occurrences} times in the sample record, expected exactly once")]
    TemplateConstruction { marker: String, occurrences: usize },

    /// Sample record serialisation failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}
