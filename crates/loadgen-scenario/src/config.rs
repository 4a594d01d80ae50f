//! YAML scenario configuration.
//!
//! ```yaml
//! seed: 42
//! flush_every_records: 1000
//! scenario:
//!   type: single_stream_insert
//!   namespace: perf_test
//!   stream: users
//!   id_column: { name: id, type: big_int, sample: 9876543210 }
//!   columns:
//!     - { name: name, type: text, sample: alice }
//!   records_to_insert: 100000
//!   dedup: true
//!   duplicate_chance: 0.1
//! ```

use crate::error::ScenarioError;
use crate::file_transfer::{FileTransferConfig, FileTransferScenario};
use crate::insert::{InsertConfig, InsertScenario};
use crate::scenario::{PerformanceScenario, RunOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which scenario to run and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioKind {
    SingleStreamInsert(InsertConfig),
    SingleStreamFileTransfer(FileTransferConfig),
}

/// A scenario configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Random seed for duplicate injection and payload bytes (same seed = same data)
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Records per message handed to the destination
    #[serde(default = "default_flush_every_records")]
    pub flush_every_records: u64,

    /// Send a stream-complete marker after the last record
    #[serde(default)]
    pub emit_stream_complete: bool,

    /// Fixed record timestamp in epoch milliseconds (wall clock when unset)
    #[serde(default)]
    pub emitted_at: Option<i64>,

    pub scenario: ScenarioKind,
}

fn default_seed() -> u64 {
    RunOptions::DEFAULT_SEED
}

fn default_flush_every_records() -> u64 {
    RunOptions::DEFAULT_FLUSH_EVERY_RECORDS
}

impl ScenarioConfig {
    /// Load a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            seed: self.seed,
            flush_every_records: self.flush_every_records,
            emit_stream_complete: self.emit_stream_complete,
            emitted_at: self.emitted_at,
        }
    }

    /// Validate the configuration and construct the scenario it describes.
    pub fn build(&self) -> Result<Box<dyn PerformanceScenario>, ScenarioError> {
        let options = self.run_options();
        Ok(match &self.scenario {
            ScenarioKind::SingleStreamInsert(config) => {
                Box::new(InsertScenario::new(config.clone(), options)?)
            }
            ScenarioKind::SingleStreamFileTransfer(config) => {
                Box::new(FileTransferScenario::new(config.clone(), options)?)
            }
        })
    }
}
