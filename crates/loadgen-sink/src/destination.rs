//! The consumer boundary.
//!
//! A destination accepts opaque messages and is otherwise a black box. Sends
//! are blocking and may fail; nothing here retries.

use crate::error::TransportError;
use std::io::Write;

/// A consumer process reachable through a message channel.
pub trait Destination {
    /// Deliver one message, blocking until the consumer has accepted it.
    fn send_message(&mut self, message: &str) -> Result<(), TransportError>;
}

impl<D: Destination + ?Sized> Destination for &mut D {
    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        (**self).send_message(message)
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        (**self).send_message(message)
    }
}

/// Destination writing each message verbatim to an `io::Write`, e.g. the
/// stdin of a child process.
pub struct WriterDestination<W: Write> {
    writer: W,
}

impl<W: Write> WriterDestination<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get the wrapped writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Destination for WriterDestination<W> {
    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory destination that records every message it accepts.
///
/// Can be told to reject sends after a number of accepted messages.
#[derive(Debug, Default)]
pub struct RecordingDestination {
    messages: Vec<String>,
    fail_after: Option<usize>,
}

impl RecordingDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `accepted` messages, then reject every further send.
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            messages: Vec::new(),
            fail_after: Some(accepted),
        }
    }

    /// Messages accepted so far, in arrival order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// All accepted messages concatenated, split back into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.messages.iter().flat_map(|m| m.lines()).collect()
    }

    /// Total bytes accepted.
    pub fn bytes_received(&self) -> u64 {
        self.messages.iter().map(|m| m.len() as u64).sum()
    }
}

impl Destination for RecordingDestination {
    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        if self.fail_after.is_some_and(|limit| self.messages.len() >= limit) {
            return Err(TransportError::Rejected(format!(
                "destination closed after {} messages",
                self.messages.len()
            )));
        }
        self.messages.push(message.to_string());
        Ok(())
    }
}
