//! Core types for the destination load generator.
//!
//! This crate provides the data model shared by every other crate in the
//! workspace:
//!
//! - [`FieldType`] - Column types a synthetic stream can declare
//! - [`FieldValue`] / [`FieldSpec`] - Sample values and column specifications
//! - [`StreamDescriptor`], [`ImportPolicy`], [`SchemaDescriptor`] - Stream identity and shape
//! - [`ConfiguredStream`] / [`Catalog`] - What the orchestration layer configures before a run
//! - [`Counters`] / [`Summary`] - Run accounting
//!
//! # Architecture
//!
//! ```text
//! loadgen-core (this crate)
//!    │
//!    ├─── loadgen-json       (codec: records and file references as JSON lines)
//!    ├─── loadgen-generator  (record templates, duplicate injection, payload blocks)
//!    ├─── loadgen-sink       (destination boundary and buffered sink)
//!    └─── loadgen-scenario   (insert and file-transfer scenarios)
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadgen_core::{FieldSpec, FieldType, ImportPolicy, SchemaDescriptor};
//!
//! let id = FieldSpec::new("id", FieldType::BigInt, 1337_i64);
//! let name = FieldSpec::new("name", FieldType::Text, "alice");
//! let schema = SchemaDescriptor::from_fields(&id, &[name]).unwrap();
//!
//! assert_eq!(schema.column_names(), vec!["id", "name"]);
//! assert!(ImportPolicy::dedupe_on("id").is_dedupe());
//! ```

pub mod error;
pub mod schema;
pub mod summary;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use error::CoreError;
pub use schema::{
    Catalog, ColumnDefinition, ConfiguredStream, ImportPolicy, SchemaDescriptor, StreamDescriptor,
};
pub use summary::{Counters, Summary};
pub use types::FieldType;
pub use values::{FieldSpec, FieldValue};
