//! Line codec: turns records and file references into transmissible protocol lines.
//!
//! The produced lines follow the destination protocol's JSON envelope:
//!
//! ```text
//! {"type":"RECORD","record":{"namespace":"ns","stream":"users","emitted_at":1700000000000,"data":{"id":1,"name":"alice"}}}
//! ```
//!
//! A line never contains a newline; terminators are the sink's concern.

use crate::error::CodecError;
use chrono::Utc;
use loadgen_core::StreamDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialises protocol messages into single lines.
pub trait RecordCodec {
    /// Encode one record carrying `data`.
    fn encode_record(
        &self,
        stream: &StreamDescriptor,
        data: &Map<String, Value>,
    ) -> Result<String, CodecError>;

    /// Encode one file-transfer record pointing at a staged file.
    fn encode_file_reference(
        &self,
        stream: &StreamDescriptor,
        file: &FileReference,
    ) -> Result<String, CodecError>;

    /// Encode the marker telling the destination a stream is complete.
    fn encode_stream_complete(&self, stream: &StreamDescriptor) -> Result<String, CodecError>;
}

/// Reference to a staged file the destination should transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Absolute location of the staged file
    pub file_url: String,
    /// Path relative to the staging root
    pub file_relative_path: String,
    /// File size in bytes
    pub bytes: u64,
    /// Last-modified time, epoch milliseconds
    pub modified: i64,
    /// Where the file originally came from
    pub source_file_url: String,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Message<'a> {
    #[serde(rename = "RECORD")]
    Record { record: RecordBody<'a> },
    #[serde(rename = "TRACE")]
    Trace { trace: TraceBody<'a> },
}

#[derive(Serialize)]
struct RecordBody<'a> {
    namespace: &'a str,
    stream: &'a str,
    emitted_at: i64,
    data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a FileReference>,
}

#[derive(Serialize)]
struct TraceBody<'a> {
    #[serde(rename = "type")]
    trace_type: &'static str,
    emitted_at: i64,
    stream_status: StreamStatus<'a>,
}

#[derive(Serialize)]
struct StreamStatus<'a> {
    stream_descriptor: &'a StreamDescriptor,
    status: &'static str,
}

/// JSON-lines codec for the destination protocol.
#[derive(Debug, Clone)]
pub struct JsonlCodec {
    emitted_at: i64,
}

impl JsonlCodec {
    /// Create a codec stamping messages with the current time.
    pub fn new() -> Self {
        Self::with_emitted_at(Utc::now().timestamp_millis())
    }

    /// Create a codec stamping every message with a fixed epoch-millisecond time.
    pub fn with_emitted_at(emitted_at: i64) -> Self {
        Self { emitted_at }
    }

    pub fn emitted_at(&self) -> i64 {
        self.emitted_at
    }

    fn encode(&self, message: &Message<'_>) -> Result<String, CodecError> {
        Ok(serde_json::to_string(message)?)
    }
}

impl Default for JsonlCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCodec for JsonlCodec {
    fn encode_record(
        &self,
        stream: &StreamDescriptor,
        data: &Map<String, Value>,
    ) -> Result<String, CodecError> {
        self.encode(&Message::Record {
            record: RecordBody {
                namespace: &stream.namespace,
                stream: &stream.name,
                emitted_at: self.emitted_at,
                data,
                file: None,
            },
        })
    }

    fn encode_file_reference(
        &self,
        stream: &StreamDescriptor,
        file: &FileReference,
    ) -> Result<String, CodecError> {
        let empty = Map::new();
        self.encode(&Message::Record {
            record: RecordBody {
                namespace: &stream.namespace,
                stream: &stream.name,
                emitted_at: self.emitted_at,
                data: &empty,
                file: Some(file),
            },
        })
    }

    fn encode_stream_complete(&self, stream: &StreamDescriptor) -> Result<String, CodecError> {
        self.encode(&Message::Trace {
            trace: TraceBody {
                trace_type: "STREAM_STATUS",
                emitted_at: self.emitted_at,
                stream_status: StreamStatus {
                    stream_descriptor: stream,
                    status: "COMPLETE",
                },
            },
        })
    }
}
