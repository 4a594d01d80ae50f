//! Batching between record synthesis and the destination.

use crate::destination::Destination;
use crate::error::SinkError;
use loadgen_core::Counters;
use tracing::{debug, warn};

/// Line terminator appended to every record; counted in `bytes_written`.
pub const LINE_TERMINATOR: char = '\n';

/// Accumulates lines and hands them to the destination in batches of
/// `flush_every` records.
///
/// Buffered records are flushed by [`BufferedSink::finish`]; if the sink is
/// dropped on an error path instead, the remainder is flushed on a best-effort
/// basis so nothing is dropped silently.
pub struct BufferedSink<'a> {
    destination: &'a mut dyn Destination,
    flush_every: u64,
    buffer: String,
    counters: Counters,
    pending: u64,
    messages_sent: u64,
}

impl<'a> BufferedSink<'a> {
    /// Create a sink flushing after every `flush_every` records.
    pub fn new(destination: &'a mut dyn Destination, flush_every: u64) -> Result<Self, SinkError> {
        if flush_every == 0 {
            return Err(SinkError::InvalidConfiguration(
                "flush_every must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            destination,
            flush_every,
            buffer: String::new(),
            counters: Counters::default(),
            pending: 0,
            messages_sent: 0,
        })
    }

    /// Buffer one line.
    pub fn write(&mut self, line: &str) -> Result<(), SinkError> {
        self.write_with(|buf| buf.push_str(line))
    }

    /// Buffer one line rendered in place by `render`.
    ///
    /// `render` must append exactly one line without a terminator.
    pub fn write_with<F>(&mut self, render: F) -> Result<(), SinkError>
    where
        F: FnOnce(&mut String),
    {
        let start = self.buffer.len();
        render(&mut self.buffer);
        self.buffer.push(LINE_TERMINATOR);
        self.counters.record((self.buffer.len() - start) as u64);
        self.pending += 1;

        if self.counters.records_written % self.flush_every == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Send the buffered lines as one message. No-op when nothing is buffered.
    pub fn flush(&mut self) -> Result<(), SinkError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let result = self.destination.send_message(&self.buffer);
        // A failed batch is not resent
        self.buffer.clear();
        self.pending = 0;
        result?;

        self.messages_sent += 1;
        debug!(
            "Flushed batch {} ({} records written so far)",
            self.messages_sent, self.counters.records_written
        );
        Ok(())
    }

    /// Flush what is left and return the run's counters.
    pub fn finish(mut self) -> Result<Counters, SinkError> {
        self.flush()?;
        Ok(self.counters)
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Messages delivered to the destination so far.
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// Lines currently held back.
    pub fn buffered_records(&self) -> u64 {
        self.pending
    }
}

impl Drop for BufferedSink<'_> {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if let Err(e) = self.flush() {
            warn!("Final flush of buffered records failed: {e}");
        }
    }
}
