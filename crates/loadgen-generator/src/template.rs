//! Fast-path record synthesis.
//!
//! The full codec runs once, on a record whose id column holds its sample
//! value. The serialised line is split around the decimal text of that value,
//! and every later record is produced by splicing its id between the two
//! halves.

use crate::digits::digit_count;
use crate::error::GeneratorError;
use loadgen_core::{FieldSpec, StreamDescriptor};
use loadgen_json::{record_data, RecordCodec};
use std::fmt::Write;

/// A serialised record split around its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    prefix: String,
    suffix: String,
}

impl RecordTemplate {
    /// Serialise one sample record with `codec` and split it at the id marker.
    ///
    /// The marker is the decimal text of the id field's sample value and must
    /// occur exactly once in the serialised record.
    pub fn new<C: RecordCodec + ?Sized>(
        codec: &C,
        stream: &StreamDescriptor,
        id_field: &FieldSpec,
        others: &[FieldSpec],
    ) -> Result<Self, GeneratorError> {
        let marker_value = match id_field.sample.as_i64() {
            Some(v) if id_field.field_type.is_integer() => v,
            _ => {
                return Err(GeneratorError::InvalidConfiguration(format!(
                    "id field '{}' must be an integer column with an integer sample, got {:?} {:?}",
                    id_field.name, id_field.field_type, id_field.sample
                )))
            }
        };

        let data = record_data(id_field, &id_field.sample, others);
        let line = codec.encode_record(stream, &data)?;
        let marker = marker_value.to_string();

        let positions = occurrences(&line, &marker);
        let [at] = positions[..] else {
            return Err(GeneratorError::TemplateConstruction {
                marker,
                occurrences: positions.len(),
            });
        };

        Ok(Self {
            prefix: line[..at].to_string(),
            suffix: line[at + marker.len()..].to_string(),
        })
    }

    /// The serialised record for `id`.
    pub fn render(&self, id: u64) -> String {
        let mut line = String::with_capacity(self.rendered_len(id));
        self.render_into(id, &mut line);
        line
    }

    /// Append the serialised record for `id` to `buf`.
    pub fn render_into(&self, id: u64, buf: &mut String) {
        buf.push_str(&self.prefix);
        // Writing to a String cannot fail
        let _ = write!(buf, "{id}");
        buf.push_str(&self.suffix);
    }

    /// Length of everything but the id.
    pub fn base_size(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }

    /// Exact length of `render(id)`.
    pub fn rendered_len(&self, id: u64) -> usize {
        self.base_size() + digit_count(id)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Byte offsets of every (possibly overlapping) occurrence of `needle`.
fn occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle.as_bytes())
        .map(|(i, _)| i)
        .collect()
}
