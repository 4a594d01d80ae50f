//! Error types for the data model.

use thiserror::Error;

/// Errors raised while building scenario descriptors.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A descriptor was built from values that can never describe a valid stream.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
