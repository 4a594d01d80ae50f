//! Record and payload generation for the destination load generator.
//!
//! # Architecture
//!
//! ```text
//! id FieldSpec + column FieldSpecs
//!        │
//!        ▼  (codec runs once)
//! ┌─────────────────┐        ┌──────────────────┐
//! │ RecordTemplate  │        │ DuplicateInjector│
//! │  prefix | suffix│        │  seeded StdRng   │
//! └────────┬────────┘        └────────┬─────────┘
//!          │ render(id)               │ should_duplicate()
//!          ▼                          ▼
//!       serialised line, emitted once or twice
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadgen_core::{FieldSpec, FieldType, StreamDescriptor};
//! use loadgen_generator::{DuplicateInjector, RecordTemplate};
//! use loadgen_json::JsonlCodec;
//!
//! let codec = JsonlCodec::with_emitted_at(0);
//! let id = FieldSpec::new("id", FieldType::BigInt, 987_654_321_i64);
//! let template = RecordTemplate::new(&codec, &StreamDescriptor::new("ns", "s"), &id, &[]).unwrap();
//! assert!(template.render(12).contains(r#""id":12}"#));
//!
//! let mut injector = DuplicateInjector::new(0.0, 42).unwrap();
//! assert!(!injector.should_duplicate());
//! ```

pub mod digits;
pub mod duplicate;
pub mod error;
pub mod payload;
pub mod template;

// Re-exports for convenience
pub use digits::digit_count;
pub use duplicate::DuplicateInjector;
pub use error::GeneratorError;
pub use payload::{random_block, MIB};
pub use template::RecordTemplate;
