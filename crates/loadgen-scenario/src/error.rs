//! Error types for scenarios.

use loadgen_core::CoreError;
use loadgen_generator::GeneratorError;
use loadgen_json::CodecError;
use loadgen_sink::{SinkError, TransportError};
use thiserror::Error;

/// Errors that can occur while configuring or running a scenario.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Settings rejected at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The record template could not be split around the id marker.
    #[error("Template construction failed: marker '{marker}' found {occurrences} times, expected exactly once")]
    TemplateConstruction { marker: String, occurrences: usize },

    /// The destination rejected or failed a send.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Message serialisation error.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// IO error while staging files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario configuration file could not be parsed.
    #[error("Failed to parse scenario configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Operation called in the wrong lifecycle state.
    #[error("Invalid scenario state: {0}")]
    InvalidState(String),
}

impl From<CoreError> for ScenarioError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfiguration(msg) => ScenarioError::InvalidConfiguration(msg),
        }
    }
}

impl From<GeneratorError> for ScenarioError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InvalidConfiguration(msg) => ScenarioError::InvalidConfiguration(msg),
            GeneratorError::TemplateConstruction {
                marker,
                occurrences,
            } => ScenarioError::TemplateConstruction {
                marker,
                occurrences,
            },
            GeneratorError::Codec(e) => ScenarioError::Codec(e),
        }
    }
}

impl From<SinkError> for ScenarioError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::InvalidConfiguration(msg) => ScenarioError::InvalidConfiguration(msg),
            SinkError::Transport(e) => ScenarioError::Transport(e),
        }
    }
}
