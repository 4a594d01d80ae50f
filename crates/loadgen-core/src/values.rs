//! Sample values and field specifications.
//!
//! A scenario never materialises whole records: each column carries one
//! sample value that is serialised once into the record template.

use crate::error::CoreError;
use crate::types::FieldType;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw sample value for a synthetic column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value (also used for dates, timestamps and decimals)
    String(String),

    /// Null value
    Null,
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can be emitted for a column of the given type.
    ///
    /// Null is accepted everywhere since every synthetic column is nullable.
    pub fn is_compatible_with(&self, field_type: &FieldType) -> bool {
        match (field_type, self) {
            (_, Self::Null) => true,
            (FieldType::Json, _) => true,
            (FieldType::Bool, Self::Bool(_)) => true,
            (FieldType::Int, Self::Int64(i)) => i32::try_from(*i).is_ok(),
            (FieldType::BigInt, Self::Int64(_)) => true,
            (FieldType::Double, Self::Int64(_) | Self::Float64(_)) => true,
            (FieldType::Decimal { .. }, Self::Int64(_) | Self::Float64(_)) => true,
            (FieldType::Decimal { .. }, Self::String(s)) => s.parse::<f64>().is_ok(),
            (FieldType::VarChar { length }, Self::String(s)) => {
                s.chars().count() <= usize::from(*length)
            }
            (FieldType::Text, Self::String(_)) => true,
            (FieldType::Date, Self::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            (FieldType::TimestampTz, Self::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
            _ => false,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// One synthetic column: name, declared type and the value every record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Value emitted in every record (for the id column: the template marker)
    pub sample: FieldValue,
}

impl FieldSpec {
    /// Create a new field specification.
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        sample: impl Into<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            sample: sample.into(),
        }
    }

    /// Check the name is usable and the sample matches the declared type.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "field name must not be empty".to_string(),
            ));
        }
        if !self.sample.is_compatible_with(&self.field_type) {
            return Err(CoreError::InvalidConfiguration(format!(
                "sample value {:?} is not a valid {:?} for field '{}'",
                self.sample, self.field_type, self.name
            )));
        }
        Ok(())
    }
}
