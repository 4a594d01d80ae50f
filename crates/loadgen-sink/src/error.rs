//! Error types for the sink layer.

use thiserror::Error;

/// A destination refused or failed to accept a message.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The consumer rejected the message.
    #[error("Message rejected by destination: {0}")]
    Rejected(String),

    /// IO error on the channel to the consumer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while buffering and flushing records.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Sink settings that can never work.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A flush failed at the destination.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
}
