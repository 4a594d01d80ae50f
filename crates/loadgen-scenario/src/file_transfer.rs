//! Single-stream file transfer scenario.
//!
//! Stages `num_files` files of `file_size_mb` MiB each, then sends one file
//! reference per file. Every file is the same seeded 1 MiB block repeated, so
//! the same seed reproduces the same bytes.

use crate::error::ScenarioError;
use crate::scenario::{
    per_second, resolve_namespace, PerformanceScenario, RunOptions, ScenarioState,
};
use chrono::{DateTime, Utc};
use loadgen_core::{
    Catalog, ConfiguredStream, ImportPolicy, SchemaDescriptor, StreamDescriptor, Summary,
};
use loadgen_generator::{random_block, MIB};
use loadgen_json::{FileReference, JsonlCodec, RecordCodec};
use loadgen_sink::{BufferedSink, Destination};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Settings of a file transfer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTransferConfig {
    pub namespace: String,
    pub stream: String,
    pub num_files: u64,
    pub file_size_mb: u64,
    /// Directory the files are staged in; created if missing
    pub staging_dir: PathBuf,
    /// Use `namespace` as a prefix for a per-run `{namespace}_{yyyymmdd}_{suffix}`
    #[serde(default)]
    pub randomize_namespace: bool,
}

impl FileTransferConfig {
    pub fn new(
        namespace: impl Into<String>,
        stream: impl Into<String>,
        num_files: u64,
        file_size_mb: u64,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            stream: stream.into(),
            num_files,
            file_size_mb,
            staging_dir: staging_dir.into(),
            randomize_namespace: false,
        }
    }

    pub fn with_randomized_namespace(mut self) -> Self {
        self.randomize_namespace = true;
        self
    }

    pub fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor::new(self.namespace.clone(), self.stream.clone())
    }

    /// Bytes in every staged file.
    pub fn file_size_bytes(&self) -> u64 {
        self.file_size_mb * MIB as u64
    }

    /// Name of the file staged at `index`.
    pub fn file_name(&self, index: u64) -> String {
        format!("test_file__{}__{}__{}.txt", self.namespace, self.stream, index)
    }
}

#[derive(Debug, Clone)]
struct StagedFile {
    path: PathBuf,
    relative_path: String,
    bytes: u64,
}

/// Stages seeded payload files and sends one reference per file.
pub struct FileTransferScenario<C: RecordCodec = JsonlCodec> {
    config: FileTransferConfig,
    options: RunOptions,
    codec: C,
    catalog: Catalog,
    staged: Vec<StagedFile>,
    state: ScenarioState,
}

impl FileTransferScenario<JsonlCodec> {
    /// Create a scenario using the JSON-lines codec.
    pub fn new(config: FileTransferConfig, options: RunOptions) -> Result<Self, ScenarioError> {
        Self::with_codec(config, options, options.codec())
    }
}

impl<C: RecordCodec> FileTransferScenario<C> {
    /// Create a scenario serialising file references through `codec`.
    pub fn with_codec(
        mut config: FileTransferConfig,
        options: RunOptions,
        codec: C,
    ) -> Result<Self, ScenarioError> {
        if config.num_files == 0 {
            return Err(ScenarioError::InvalidConfiguration(
                "num_files must be at least 1".to_string(),
            ));
        }
        if config.file_size_mb == 0 {
            return Err(ScenarioError::InvalidConfiguration(
                "file_size_mb must be at least 1".to_string(),
            ));
        }

        resolve_namespace(
            &mut config.namespace,
            &config.stream,
            &mut config.randomize_namespace,
        );

        // File transfer streams always append
        let stream = ConfiguredStream::new(
            config.descriptor(),
            ImportPolicy::Append,
            SchemaDescriptor::default(),
        );

        Ok(Self {
            config,
            options,
            codec,
            catalog: Catalog::new(vec![stream]),
            staged: Vec::new(),
            state: ScenarioState::Idle,
        })
    }

    pub fn config(&self) -> &FileTransferConfig {
        &self.config
    }

    /// Paths of the staged files, in send order.
    pub fn staged_files(&self) -> Vec<&Path> {
        self.staged.iter().map(|f| f.path.as_path()).collect()
    }

    /// Write every payload file to the staging directory.
    ///
    /// Files from an earlier staging are removed first. If any file fails to
    /// write, every file created by this call is removed and nothing is staged.
    pub fn stage(&mut self) -> Result<(), ScenarioError> {
        let start_time = Instant::now();
        self.cleanup()?;
        fs::create_dir_all(&self.config.staging_dir)?;
        let staging_dir = fs::canonicalize(&self.config.staging_dir)?;
        info!(
            "Staging {} files of {} MiB in '{}'",
            self.config.num_files,
            self.config.file_size_mb,
            staging_dir.display()
        );

        let block = random_block(self.options.seed, MIB);
        let mut staged: Vec<StagedFile> = Vec::new();

        for index in 0..self.config.num_files {
            let relative_path = self.config.file_name(index);
            let path = staging_dir.join(&relative_path);

            if let Err(e) = self.write_payload(&path, &block) {
                warn!("Staging '{}' failed: {e}", path.display());
                for file in &staged {
                    discard(&file.path);
                }
                if path.is_file() {
                    discard(&path);
                }
                return Err(e.into());
            }

            debug!("Staged '{}'", path.display());
            staged.push(StagedFile {
                path,
                relative_path,
                bytes: self.config.file_size_bytes(),
            });
        }

        self.staged = staged;
        self.state = ScenarioState::Staged;
        info!(
            "Staged {} files in {:?}",
            self.staged.len(),
            start_time.elapsed()
        );
        Ok(())
    }

    fn write_payload(&self, path: &Path, block: &[u8]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for _ in 0..self.config.file_size_mb {
            writer.write_all(block)?;
        }
        writer.flush()
    }

    /// Remove every staged file.
    pub fn cleanup(&mut self) -> Result<(), ScenarioError> {
        for file in self.staged.drain(..) {
            match fs::remove_file(&file.path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Staged file '{}' already removed", file.path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        self.state = ScenarioState::Idle;
        Ok(())
    }

    fn file_reference(&self, file: &StagedFile) -> Result<FileReference, ScenarioError> {
        let modified: DateTime<Utc> = fs::metadata(&file.path)?.modified()?.into();
        let file_url = file.path.display().to_string();
        Ok(FileReference {
            source_file_url: file_url.clone(),
            file_url,
            file_relative_path: file.relative_path.clone(),
            bytes: file.bytes,
            modified: modified.timestamp_millis(),
        })
    }

    fn run(&self, destination: &mut dyn Destination) -> Result<Summary, ScenarioError> {
        let start_time = Instant::now();
        let descriptor = &self.catalog.streams[0].descriptor;
        info!(
            "Sending {} file references to '{}'",
            self.staged.len(),
            descriptor
        );

        // One message per file
        let mut sink = BufferedSink::new(&mut *destination, 1)?;
        let mut bytes_sent = 0;
        for file in &self.staged {
            let reference = self.file_reference(file)?;
            sink.write(&self.codec.encode_file_reference(descriptor, &reference)?)?;
            bytes_sent += file.bytes;
        }
        let counters = sink.finish()?;

        if self.options.emit_stream_complete {
            let marker = self.codec.encode_stream_complete(descriptor)?;
            destination.send_message(&format!("{marker}\n"))?;
        }

        let summary = Summary {
            records_sent: counters.records_written,
            bytes_sent,
            expected_records_after_dedup: counters.records_written,
        };

        let elapsed = start_time.elapsed();
        info!(
            "File transfer complete: {} files, {} bytes in {:?} ({:.2} files/sec)",
            summary.records_sent,
            summary.bytes_sent,
            elapsed,
            per_second(summary.records_sent, elapsed)
        );
        Ok(summary)
    }
}

impl<C: RecordCodec> PerformanceScenario for FileTransferScenario<C> {
    fn name(&self) -> &'static str {
        "single_stream_file_transfer"
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn setup(&mut self) -> Result<(), ScenarioError> {
        self.stage()
    }

    fn send(&mut self, destination: &mut dyn Destination) -> Result<Summary, ScenarioError> {
        if !matches!(
            self.state,
            ScenarioState::Staged | ScenarioState::Done(_) | ScenarioState::Failed
        ) {
            return Err(ScenarioError::InvalidState(
                "files must be staged before sending".to_string(),
            ));
        }

        self.state = ScenarioState::Sending;
        match self.run(destination) {
            Ok(summary) => {
                self.state = ScenarioState::Done(summary);
                Ok(summary)
            }
            Err(e) => {
                self.state = ScenarioState::Failed;
                Err(e)
            }
        }
    }

    fn state(&self) -> ScenarioState {
        self.state
    }
}

/// Remove a file created during a failed staging, logging what cannot be removed.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove '{}': {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_sink::RecordingDestination;
    use serde_json::Value;
    use tempfile::TempDir;

    fn scenario(dir: &Path, num_files: u64, file_size_mb: u64) -> FileTransferScenario {
        FileTransferScenario::with_codec(
            FileTransferConfig::new("perf_ns", "files", num_files, file_size_mb, dir),
            RunOptions::default(),
            JsonlCodec::with_emitted_at(0),
        )
        .unwrap()
    }

    #[test]
    fn test_stage_writes_named_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 3, 1);

        scenario.stage().unwrap();

        assert_eq!(scenario.state(), ScenarioState::Staged);
        let files = scenario.staged_files();
        assert_eq!(files.len(), 3);
        for (index, path) in files.iter().enumerate() {
            assert_eq!(
                path.file_name().unwrap().to_str().unwrap(),
                format!("test_file__perf_ns__files__{index}.txt")
            );
            assert_eq!(fs::metadata(path).unwrap().len(), MIB as u64);
        }
    }

    #[test]
    fn test_block_is_repeated_within_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 1, 2);
        scenario.stage().unwrap();

        let bytes = fs::read(scenario.staged_files()[0]).unwrap();
        assert_eq!(bytes.len(), 2 * MIB);
        assert_eq!(bytes[..MIB], bytes[MIB..]);
        let block = random_block(RunOptions::DEFAULT_SEED, MIB);
        assert_eq!(bytes[..MIB], block[..]);
    }

    #[test]
    fn test_send_one_message_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 4, 1);
        scenario.stage().unwrap();
        let mut destination = RecordingDestination::new();

        let summary = scenario.send(&mut destination).unwrap();

        assert_eq!(summary.records_sent, 4);
        assert_eq!(summary.bytes_sent, 4 * 1_048_576);
        assert_eq!(summary.expected_records_after_dedup, 4);
        assert_eq!(destination.messages().len(), 4);

        let message: Value = serde_json::from_str(destination.messages()[2].trim_end()).unwrap();
        let file = &message["record"]["file"];
        assert_eq!(file["bytes"], 1_048_576);
        let name = "test_file__perf_ns__files__2.txt";
        assert_eq!(file["file_relative_path"], name);
        assert!(file["file_url"]
            .as_str()
            .unwrap()
            .ends_with("test_file__perf_ns__files__2.txt"));
        assert_eq!(file["file_url"], file["source_file_url"]);
    }

    #[test]
    fn test_send_before_stage_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 1, 1);
        let result = scenario.send(&mut RecordingDestination::new());
        assert!(matches!(result, Err(ScenarioError::InvalidState(_))));
        assert_eq!(scenario.state(), ScenarioState::Idle);
    }

    #[test]
    fn test_failed_stage_removes_created_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 3, 1);
        let blocker = temp_dir.path().join(scenario.config().file_name(1));
        fs::create_dir(&blocker).unwrap();

        let result = scenario.stage();

        assert!(matches!(result, Err(ScenarioError::Io(_))));
        assert_eq!(scenario.state(), ScenarioState::Idle);
        assert!(scenario.staged_files().is_empty());
        for index in [0, 2] {
            let path = temp_dir.path().join(scenario.config().file_name(index));
            assert!(!path.exists());
        }
        assert!(blocker.is_dir());

        let result = scenario.send(&mut RecordingDestination::new());
        assert!(matches!(result, Err(ScenarioError::InvalidState(_))));
    }

    #[test]
    fn test_restage_replaces_previous_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 2, 1);
        scenario.stage().unwrap();
        scenario.send(&mut RecordingDestination::new()).unwrap();

        scenario.stage().unwrap();

        assert_eq!(scenario.state(), ScenarioState::Staged);
        assert_eq!(scenario.staged_files().len(), 2);
        let summary = scenario.send(&mut RecordingDestination::new()).unwrap();
        assert_eq!(summary.records_sent, 2);
    }

    #[test]
    fn test_transport_failure_marks_failed() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 3, 1);
        scenario.setup().unwrap();

        let result = scenario.send(&mut RecordingDestination::failing_after(1));

        assert!(matches!(result, Err(ScenarioError::Transport(_))));
        assert_eq!(scenario.state(), ScenarioState::Failed);
        assert!(scenario.summary().is_none());
    }

    #[test]
    fn test_cleanup_removes_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = scenario(temp_dir.path(), 2, 1);
        scenario.stage().unwrap();
        let paths: Vec<PathBuf> = scenario
            .staged_files()
            .iter()
            .map(|p| p.to_path_buf())
            .collect();

        scenario.cleanup().unwrap();

        assert!(paths.iter().all(|p| !p.exists()));
        assert!(scenario.staged_files().is_empty());
        assert_eq!(scenario.state(), ScenarioState::Idle);
    }

    #[test]
    fn test_invalid_counts_rejected() {
        for (num_files, size) in [(0, 1), (1, 0)] {
            let result = FileTransferScenario::new(
                FileTransferConfig::new("ns", "s", num_files, size, "/tmp/unused"),
                RunOptions::default(),
            );
            assert!(matches!(result, Err(ScenarioError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_randomized_namespace_names_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = FileTransferConfig::new("perf_ns", "files", 1, 1, temp_dir.path())
            .with_randomized_namespace();
        let mut scenario =
            FileTransferScenario::with_codec(config, RunOptions::default(), JsonlCodec::new())
                .unwrap();

        let namespace = scenario.catalog().streams[0].descriptor.namespace.clone();
        assert!(namespace.starts_with("perf_ns_"));
        assert_eq!(namespace.len(), "perf_ns".len() + 16);
        assert_eq!(scenario.config().namespace, namespace);

        scenario.stage().unwrap();
        let file_name = scenario.staged_files()[0].file_name().unwrap().to_owned();
        assert_eq!(
            file_name.to_str().unwrap(),
            format!("test_file__{namespace}__files__0.txt")
        );
    }

    #[test]
    fn test_catalog_is_append() {
        let temp_dir = TempDir::new().unwrap();
        let scenario = scenario(temp_dir.path(), 1, 1);
        let stream = &scenario.catalog().streams[0];
        assert_eq!(stream.import_policy, ImportPolicy::Append);
        assert!(stream.schema.is_empty());
    }
}
