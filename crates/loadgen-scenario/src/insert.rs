//! Single-stream record insert scenario.

use crate::error::ScenarioError;
use crate::scenario::{
    per_second, resolve_namespace, PerformanceScenario, RunOptions, ScenarioState,
};
use loadgen_core::{
    Catalog, ConfiguredStream, FieldSpec, ImportPolicy, SchemaDescriptor, StreamDescriptor,
    Summary,
};
use loadgen_generator::{DuplicateInjector, RecordTemplate};
use loadgen_json::{JsonlCodec, RecordCodec};
use loadgen_sink::{BufferedSink, Destination};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Settings of a single-stream insert run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertConfig {
    pub namespace: String,
    pub stream: String,
    /// Id column; the decimal text of its sample value is the template marker
    /// and must occur exactly once in the sample record, timestamp included.
    /// Use a long sample (e.g. `1357913579`) or pin `emitted_at`.
    pub id_column: FieldSpec,
    #[serde(default)]
    pub columns: Vec<FieldSpec>,
    pub records_to_insert: u64,
    /// Declare the stream as dedupe on the id column
    #[serde(default)]
    pub dedup: bool,
    #[serde(default)]
    pub duplicate_chance: f64,
    #[serde(default)]
    pub generation_id: u64,
    #[serde(default)]
    pub minimum_generation_id: u64,
    #[serde(default = "default_sync_id")]
    pub sync_id: u64,
    /// Use `namespace` as a prefix for a per-run `{namespace}_{yyyymmdd}_{suffix}`
    #[serde(default)]
    pub randomize_namespace: bool,
}

fn default_sync_id() -> u64 {
    1
}

impl InsertConfig {
    /// Append run of `records_to_insert` records with no other columns.
    pub fn new(
        namespace: impl Into<String>,
        stream: impl Into<String>,
        id_column: FieldSpec,
        records_to_insert: u64,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            stream: stream.into(),
            id_column,
            columns: Vec::new(),
            records_to_insert,
            dedup: false,
            duplicate_chance: 0.0,
            generation_id: 0,
            minimum_generation_id: 0,
            sync_id: default_sync_id(),
            randomize_namespace: false,
        }
    }

    pub fn with_columns(mut self, columns: Vec<FieldSpec>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_duplicate_chance(mut self, chance: f64) -> Self {
        self.duplicate_chance = chance;
        self
    }

    pub fn with_randomized_namespace(mut self) -> Self {
        self.randomize_namespace = true;
        self
    }

    pub fn with_generation(mut self, generation_id: u64, minimum_generation_id: u64) -> Self {
        self.generation_id = generation_id;
        self.minimum_generation_id = minimum_generation_id;
        self
    }

    pub fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor::new(self.namespace.clone(), self.stream.clone())
    }
}

/// Sends ids `1..=records_to_insert` through a record template, optionally
/// doubling records, and reports what the destination should end up with.
pub struct InsertScenario<C: RecordCodec = JsonlCodec> {
    config: InsertConfig,
    options: RunOptions,
    codec: C,
    catalog: Catalog,
    template: RecordTemplate,
    state: ScenarioState,
}

impl InsertScenario<JsonlCodec> {
    /// Create a scenario using the JSON-lines codec.
    pub fn new(config: InsertConfig, options: RunOptions) -> Result<Self, ScenarioError> {
        Self::with_codec(config, options, options.codec())
    }
}

impl<C: RecordCodec> InsertScenario<C> {
    /// Create a scenario serialising through `codec`.
    ///
    /// All validation happens here; a constructed scenario only fails at the
    /// destination.
    pub fn with_codec(
        mut config: InsertConfig,
        options: RunOptions,
        codec: C,
    ) -> Result<Self, ScenarioError> {
        options.validate()?;
        if config.records_to_insert == 0 {
            return Err(ScenarioError::InvalidConfiguration(
                "records_to_insert must be at least 1".to_string(),
            ));
        }
        // Validate the chance up front, the run creates its own injector
        DuplicateInjector::new(config.duplicate_chance, options.seed)?;

        resolve_namespace(
            &mut config.namespace,
            &config.stream,
            &mut config.randomize_namespace,
        );
        let descriptor = config.descriptor();
        let schema = SchemaDescriptor::from_fields(&config.id_column, &config.columns)?;
        let import_policy = if config.dedup {
            ImportPolicy::dedupe_on(config.id_column.name.clone())
        } else {
            ImportPolicy::Append
        };
        let template =
            RecordTemplate::new(&codec, &descriptor, &config.id_column, &config.columns)?;

        let stream = ConfiguredStream::new(descriptor, import_policy, schema)
            .with_generation(config.generation_id, config.minimum_generation_id)
            .with_sync_id(config.sync_id);

        Ok(Self {
            config,
            options,
            codec,
            catalog: Catalog::new(vec![stream]),
            template,
            state: ScenarioState::Idle,
        })
    }

    pub fn template(&self) -> &RecordTemplate {
        &self.template
    }

    pub fn config(&self) -> &InsertConfig {
        &self.config
    }

    fn stream(&self) -> &ConfiguredStream {
        &self.catalog.streams[0]
    }

    fn run(&self, destination: &mut dyn Destination) -> Result<Summary, ScenarioError> {
        let start_time = Instant::now();
        let descriptor = &self.stream().descriptor;
        let total = self.config.records_to_insert;
        info!(
            "Inserting {} records into '{}' (dedup: {}, duplicate chance: {})",
            total, descriptor, self.config.dedup, self.config.duplicate_chance
        );

        let mut injector = DuplicateInjector::new(self.config.duplicate_chance, self.options.seed)?;
        let mut sink = BufferedSink::new(&mut *destination, self.options.flush_every_records)?;

        for id in 1..=total {
            sink.write_with(|buf| self.template.render_into(id, buf))?;
            if injector.should_duplicate() {
                sink.write_with(|buf| self.template.render_into(id, buf))?;
            }

            if id % 10_000 == 0 {
                debug!("Rendered {} of {} ids", id, total);
            }
        }
        let counters = sink.finish()?;

        if self.options.emit_stream_complete {
            let marker = self.codec.encode_stream_complete(descriptor)?;
            destination.send_message(&format!("{marker}\n"))?;
        }

        let summary = if self.stream().import_policy.is_dedupe() {
            Summary::dedupe(counters, total)
        } else {
            Summary::append(counters)
        };

        let elapsed = start_time.elapsed();
        info!(
            "Insert complete: {} records ({} duplicates), {} bytes in {:?} ({:.2} records/sec)",
            summary.records_sent,
            summary.records_sent - total,
            summary.bytes_sent,
            elapsed,
            per_second(summary.records_sent, elapsed)
        );

        Ok(summary)
    }
}

impl<C: RecordCodec> PerformanceScenario for InsertScenario<C> {
    fn name(&self) -> &'static str {
        "single_stream_insert"
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn send(&mut self, destination: &mut dyn Destination) -> Result<Summary, ScenarioError> {
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
