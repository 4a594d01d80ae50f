//! JSON codec for loadgen-core types.
//!
//! # Modules
//!
//! - [`forward`] - typed sample value → JSON value conversion
//! - [`codec`] - the [`RecordCodec`] seam and the JSON-lines protocol codec
//!
//! # Example
//!
//! ```rust
//! use loadgen_core::{FieldSpec, FieldType, FieldValue, StreamDescriptor};
//! use loadgen_json::{record_data, JsonlCodec, RecordCodec};
//!
//! let id = FieldSpec::new("id", FieldType::BigInt, 1_i64);
//! let data = record_data(&id, &FieldValue::Int64(5), &[]);
//! let codec = JsonlCodec::with_emitted_at(0);
//! let line = codec
//!     .encode_record(&StreamDescriptor::new("ns", "users"), &data)
//!     .unwrap();
//! assert!(line.ends_with(r#""data":{"id":5}}}"#));
//! ```

pub mod codec;
pub mod error;
pub mod forward;

pub use codec::{FileReference, JsonlCodec, RecordCodec};
pub use error::CodecError;
pub use forward::{fields_to_json, record_data, JsonValue, TypedField};
