//! Destination boundary and buffered sink for the load generator.
//!
//! Records are rendered straight into the sink's buffer and shipped to the
//! destination in batches, with exact record and byte accounting.
//!
//! # Example
//!
//! ```rust
//! use loadgen_sink::{BufferedSink, RecordingDestination};
//!
//! let mut destination = RecordingDestination::new();
//! let mut sink = BufferedSink::new(&mut destination, 2).unwrap();
//! sink.write("first").unwrap();
//! sink.write("second").unwrap();
//! sink.write("third").unwrap();
//! let counters = sink.finish().unwrap();
//!
//! assert_eq!(counters.records_written, 3);
//! assert_eq!(destination.messages().len(), 2);
//! ```

pub mod buffered;
pub mod destination;
pub mod error;

pub use buffered::{BufferedSink, LINE_TERMINATOR};
pub use destination::{Destination, RecordingDestination, WriterDestination};
pub use error::{SinkError, TransportError};
