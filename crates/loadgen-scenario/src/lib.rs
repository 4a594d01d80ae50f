//! Load-generation scenarios for destination connectors.
//!
//! A scenario owns its settings, builds the catalog the orchestration layer
//! configures the destination with, and drives a complete run into a
//! [`Destination`](loadgen_sink::Destination):
//!
//! - [`InsertScenario`] sends `records_to_insert` records with ids `1..=N`
//!   rendered from a pre-split template, optionally injecting duplicates.
//! - [`FileTransferScenario`] stages seeded payload files and sends one
//!   file reference per file.
//!
//! # Example
//!
//! ```
//! use loadgen_core::{FieldSpec, FieldType};
//! use loadgen_scenario::{InsertConfig, InsertScenario, PerformanceScenario, RunOptions};
//! use loadgen_sink::RecordingDestination;
//!
//! let id = FieldSpec::new("id", FieldType::Int, 1_357_913_579_i64);
//! let config = InsertConfig::new("perf_test", "users", id, 100);
//! let mut scenario = InsertScenario::new(config, RunOptions::default()).unwrap();
//!
//! let mut destination = RecordingDestination::new();
//! let summary = scenario.send(&mut destination).unwrap();
//! assert_eq!(summary.records_sent, 100);
//! assert_eq!(summary.expected_records_after_dedup, 100);
//! ```

pub mod config;
pub mod error;
pub mod file_transfer;
pub mod insert;
pub mod scenario;

pub use config::{ScenarioConfig, ScenarioKind};
pub use error::ScenarioError;
pub use file_transfer::{FileTransferConfig, FileTransferScenario};
pub use insert::{InsertConfig, InsertScenario};
pub use scenario::{PerformanceScenario, RunOptions, ScenarioState};
