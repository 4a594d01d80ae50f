//! The scenario abstraction shared by record and file-transfer runs.

use crate::error::ScenarioError;
use loadgen_core::{Catalog, StreamDescriptor, Summary};
use loadgen_json::JsonlCodec;
use loadgen_sink::Destination;
use tracing::info;

/// Lifecycle of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    /// Constructed, nothing sent.
    Idle,
    /// Payload files are on disk (file-transfer scenarios only).
    Staged,
    /// A run is in progress.
    Sending,
    /// The last run completed.
    Done(Summary),
    /// The last run aborted; no summary is committed.
    Failed,
}

/// A self-contained load-generation run against a destination.
pub trait PerformanceScenario {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The streams this scenario writes to, for the orchestration layer.
    fn catalog(&self) -> &Catalog;

    /// Prepare everything the run needs before any message is sent.
    fn setup(&mut self) -> Result<(), ScenarioError> {
        Ok(())
    }

    /// Drive the whole run into `destination`, blocking on every send.
    fn send(&mut self, destination: &mut dyn Destination) -> Result<Summary, ScenarioError>;

    fn state(&self) -> ScenarioState;

    /// Summary of the last completed run.
    fn summary(&self) -> Option<Summary> {
        match self.state() {
            ScenarioState::Done(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Settings shared by every scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed for duplicate injection and payload bytes.
    pub seed: u64,
    /// Records per message handed to the destination.
    pub flush_every_records: u64,
    /// Send a stream-complete marker after the last record.
    pub emit_stream_complete: bool,
    /// Fixed `emitted_at` in epoch milliseconds; the wall clock when unset.
    pub emitted_at: Option<i64>,
}

impl RunOptions {
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_FLUSH_EVERY_RECORDS: u64 = 10_000;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_flush_every_records(mut self, records: u64) -> Self {
        self.flush_every_records = records;
        self
    }

    pub fn with_stream_complete(mut self, emit: bool) -> Self {
        self.emit_stream_complete = emit;
        self
    }

    pub fn with_emitted_at(mut self, emitted_at_ms: i64) -> Self {
        self.emitted_at = Some(emitted_at_ms);
        self
    }

    /// JSON-lines codec stamped with `emitted_at`, or the current time.
    pub fn codec(&self) -> JsonlCodec {
        self.emitted_at.map_or_else(JsonlCodec::new, JsonlCodec::with_emitted_at)
    }

    pub(crate) fn validate(&self) -> Result<(), ScenarioError> {
        if self.flush_every_records == 0 {
            return Err(ScenarioError::InvalidConfiguration(
                "flush_every_records must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            flush_every_records: Self::DEFAULT_FLUSH_EVERY_RECORDS,
            emit_stream_complete: false,
            emitted_at: None,
        }
    }
}

/// Expand `namespace` to `{namespace}_{yyyymmdd}_{suffix}` if `randomize` is
/// set. The flag is cleared so a resolved config is not expanded twice.
pub(crate) fn resolve_namespace(namespace: &mut String, stream: &str, randomize: &mut bool) {
    if std::mem::take(randomize) {
        let descriptor =
            StreamDescriptor::randomized(namespace.as_str(), stream, &mut rand::thread_rng());
        info!("Using randomized namespace '{}'", descriptor.namespace);
        *namespace = descriptor.namespace;
    }
}

/// Records per second over `elapsed`, 0 when no time passed.
pub(crate) fn per_second(count: u64, elapsed: std::time::Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        count as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
