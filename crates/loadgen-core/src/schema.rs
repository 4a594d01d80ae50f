//! Stream and catalog descriptors handed to the orchestration layer.
//!
//! ## Type Hierarchy
//!
//! - `StreamDescriptor` - namespace + name of one destination stream
//! - `ImportPolicy` - append, or dedupe on primary key / cursor
//! - `ColumnDefinition` / `SchemaDescriptor` - ordered columns of the stream
//! - `ConfiguredStream` - everything above plus generation bookkeeping
//! - `Catalog` - the streams a scenario writes to

use crate::error::CoreError;
use crate::types::FieldType;
use crate::values::FieldSpec;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Length of the random suffix appended by [`StreamDescriptor::randomized`].
const NAMESPACE_SUFFIX_LEN: usize = 6;

// ============================================================================
// Stream Identity
// ============================================================================

/// Uniquely identifies a logical destination stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Stream namespace
    pub namespace: String,

    /// Stream name
    pub name: String,
}

impl StreamDescriptor {
    /// Create a new stream descriptor.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a descriptor whose namespace is `{prefix}_{yyyymmdd}_{suffix}`.
    ///
    /// Lets concurrent runs against one destination write to disjoint namespaces.
    pub fn randomized<R: Rng>(prefix: &str, name: impl Into<String>, rng: &mut R) -> Self {
        Self::randomized_at(prefix, name, Utc::now(), rng)
    }

    fn randomized_at<R: Rng>(
        prefix: &str,
        name: impl Into<String>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let suffix: String = rng
            .sample_iter(&Alphanumeric)
            .take(NAMESPACE_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self::new(format!("{prefix}_{}_{suffix}", now.format("%Y%m%d")), name)
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

// ============================================================================
// Import Policy
// ============================================================================

/// How the destination reconciles the rows it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Every received row is kept.
    Append,

    /// Rows are collapsed on the primary key, latest cursor wins.
    Dedupe {
        /// Field paths forming the primary key
        primary_key: Vec<Vec<String>>,
        /// Field path of the cursor
        cursor: Vec<String>,
    },
}

impl ImportPolicy {
    /// Dedupe keyed and ordered on a single column.
    pub fn dedupe_on(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::Dedupe {
            primary_key: vec![vec![column.clone()]],
            cursor: vec![column],
        }
    }

    /// Check if rows are collapsed downstream.
    pub fn is_dedupe(&self) -> bool {
        matches!(self, Self::Dedupe { .. })
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: FieldType,

    /// Whether this column is nullable
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new nullable column definition.
    pub fn nullable(name: impl Into<String>, column_type: FieldType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }
}

/// Ordered column list of a stream.
///
/// Column order is insertion order and is the order fields are serialised in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescriptor {
    columns: Vec<ColumnDefinition>,
}

impl SchemaDescriptor {
    /// Build the schema from the id field followed by the other fields.
    ///
    /// Every column is declared nullable. Fails on empty or repeated names.
    pub fn from_fields(id: &FieldSpec, others: &[FieldSpec]) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(others.len() + 1);
        for field in std::iter::once(id).chain(others) {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(CoreError::InvalidConfiguration(format!(
                    "duplicate column name '{}'",
                    field.name
                )));
            }
            columns.push(ColumnDefinition::nullable(
                field.name.clone(),
                field.field_type.clone(),
            ));
        }
        Ok(Self { columns })
    }

    /// Columns in serialisation order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A stream as configured for one sync: the tuple the orchestration layer
/// consumes before the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    pub descriptor: StreamDescriptor,
    pub import_policy: ImportPolicy,
    pub schema: SchemaDescriptor,
    pub generation_id: u64,
    pub minimum_generation_id: u64,
    pub sync_id: u64,
}

impl ConfiguredStream {
    /// Create a configured stream with generation 0 and sync id 1.
    pub fn new(
        descriptor: StreamDescriptor,
        import_policy: ImportPolicy,
        schema: SchemaDescriptor,
    ) -> Self {
        Self {
            descriptor,
            import_policy,
            schema,
            generation_id: 0,
            minimum_generation_id: 0,
            sync_id: 1,
        }
    }

    /// Set the generation bookkeeping ids.
    pub fn with_generation(mut self, generation_id: u64, minimum_generation_id: u64) -> Self {
        self.generation_id = generation_id;
        self.minimum_generation_id = minimum_generation_id;
        self
    }

    /// Set the sync id.
    pub fn with_sync_id(mut self, sync_id: u64) -> Self {
        self.sync_id = sync_id;
        self
    }
}

/// The streams a scenario writes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<ConfiguredStream>,
}

impl Catalog {
    pub fn new(streams: Vec<ConfiguredStream>) -> Self {
        Self { streams }
    }
}
