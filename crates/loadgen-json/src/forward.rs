//! Forward conversion: typed sample value → JSON value.

use loadgen_core::{FieldSpec, FieldType, FieldValue};
use serde_json::{json, Map, Value};

/// Wrapper for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValue(pub Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// A sample value together with the column type it is emitted as.
#[derive(Debug, Clone, Copy)]
pub struct TypedField<'a> {
    pub field_type: &'a FieldType,
    pub value: &'a FieldValue,
}

impl<'a> TypedField<'a> {
    pub fn new(field_type: &'a FieldType, value: &'a FieldValue) -> Self {
        Self { field_type, value }
    }
}

impl<'a> From<&'a FieldSpec> for TypedField<'a> {
    fn from(spec: &'a FieldSpec) -> Self {
        Self::new(&spec.field_type, &spec.sample)
    }
}

impl From<TypedField<'_>> for JsonValue {
    fn from(tf: TypedField<'_>) -> Self {
        match (tf.field_type, tf.value) {
            // Null
            (_, FieldValue::Null) => JsonValue(Value::Null),

            // Double accepts whole-number samples but is always emitted as a float
            (FieldType::Double, FieldValue::Int64(i)) => JsonValue(json!(*i as f64)),

            // Decimal - store as string with the declared scale to preserve precision
            (FieldType::Decimal { scale, .. }, FieldValue::Int64(i)) => {
                JsonValue(json!(format!("{:.*}", usize::from(*scale), *i as f64)))
            }
            (FieldType::Decimal { scale, .. }, FieldValue::Float64(f)) => {
                JsonValue(json!(format!("{:.*}", usize::from(*scale), f)))
            }

            // JSON can also be a string
            (FieldType::Json, FieldValue::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(v) => JsonValue(v),
                Err(_) => JsonValue(json!(s)),
            },

            // Everything else maps onto its natural JSON form
            (_, value) => JsonValue(field_value_to_json(value)),
        }
    }
}

/// Convert a sample value to a JSON value (without type context).
fn field_value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => json!(*b),
        FieldValue::Int64(i) => json!(*i),
        FieldValue::Float64(f) => json!(*f),
        FieldValue::String(s) => json!(s),
    }
}

/// Convert an ordered list of fields to a JSON object.
///
/// Keys keep the order of `fields`.
pub fn fields_to_json<'a, I>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, TypedField<'a>)>,
{
    let mut obj = Map::new();
    for (name, tf) in fields {
        obj.insert(name.to_string(), JsonValue::from(tf).into_inner());
    }
    obj
}

/// Build the data object of a record whose id column holds `id` and every
/// other column holds its sample.
pub fn record_data(
    id_field: &FieldSpec,
    id: &FieldValue,
    others: &[FieldSpec],
) -> Map<String, Value> {
    let id_entry = (
        id_field.name.as_str(),
        TypedField::new(&id_field.field_type, id),
    );
    let rest = others
        .iter()
        .map(|f| (f.name.as_str(), TypedField::from(f)));
    fields_to_json(std::iter::once(id_entry).chain(rest))
}
