//! Destination load generator
//!
//! Synthetic load for destination connector performance tests. A scenario
//! builds a catalog for the destination, then streams records (or file
//! references) to it as newline-delimited protocol messages and reports how
//! many records and bytes it sent and how many records the destination should
//! hold once deduplication has run.
//!
//! # Crates
//!
//! - `loadgen_core` - field types, stream and catalog descriptors, summaries
//! - `loadgen_json` - JSON-lines protocol codec
//! - `loadgen_generator` - record templates, duplicate injection, payload blocks
//! - `loadgen_sink` - destination boundary and buffered sink
//! - `loadgen_scenario` - insert and file transfer scenarios, YAML configuration
//!
//! # Example
//!
//! ```
//! use destination_loadgen::{PerformanceScenario, RecordingDestination, ScenarioConfig};
//!
//! let config = ScenarioConfig::from_yaml(
//!     r#"
//! scenario:
//!   type: single_stream_insert
//!   namespace: perf_test
//!   stream: users
//!   id_column: { name: id, type: int, sample: 1357913579 }
//!   columns:
//!     - { name: name, type: string, sample: alice }
//!   records_to_insert: 1000
//! "#,
//! )
//! .unwrap();
//!
//! let mut scenario = config.build().unwrap();
//! let mut destination = RecordingDestination::new();
//! let summary = scenario.send(&mut destination).unwrap();
//! assert_eq!(summary.records_sent, 1000);
//! assert_eq!(summary.expected_records_after_dedup, 1000);
//! ```

pub mod logging;

pub use logging::init_tracing;

pub use loadgen_core::{
    Catalog, ConfiguredStream, Counters, FieldSpec, FieldType, FieldValue, ImportPolicy,
    SchemaDescriptor, StreamDescriptor, Summary,
};
pub use loadgen_generator::{DuplicateInjector, RecordTemplate};
pub use loadgen_json::{FileReference, JsonlCodec, RecordCodec};
pub use loadgen_scenario::{
    FileTransferConfig, FileTransferScenario, InsertConfig, InsertScenario, PerformanceScenario,
    RunOptions, ScenarioConfig, ScenarioError, ScenarioKind, ScenarioState,
};
pub use loadgen_sink::{
    BufferedSink, Destination, RecordingDestination, TransportError, WriterDestination,
};
