//! Column types for synthetic streams.
//!
//! `FieldType` is the small type universe a scenario can declare for its
//! columns. It drives both the schema handed to the destination and the
//! validation of each column's sample value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Type of a synthetic column.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: int
/// type: text
/// ```
///
/// Parameterised types use object format:
/// ```yaml
/// type:
///   type: var_char
///   length: 255
/// type:
///   type: decimal
///   precision: 10
///   scale: 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Boolean value
    Bool,

    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    BigInt,

    /// 64-bit IEEE 754 floating point
    Double,

    /// Exact decimal with specified precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        scale: u8,
    },

    /// Variable-length character string with max length
    VarChar {
        /// Maximum length in characters
        length: u16,
    },

    /// Unlimited text
    Text,

    /// Date only (YYYY-MM-DD)
    Date,

    /// RFC 3339 timestamp with timezone
    TimestampTz,

    /// Arbitrary JSON document
    Json,
}

impl FieldType {
    /// Whether this type holds whole numbers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int | Self::BigInt)
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Bool => serializer.serialize_str("bool"),
            Self::Int => serializer.serialize_str("int"),
            Self::BigInt => serializer.serialize_str("big_int"),
            Self::Double => serializer.serialize_str("double"),
            Self::Text => serializer.serialize_str("text"),
            Self::Date => serializer.serialize_str("date"),
            Self::TimestampTz => serializer.serialize_str("timestamp_tz"),
            Self::Json => serializer.serialize_str("json"),

            Self::Decimal { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "decimal")?;
                map.serialize_entry("precision", precision)?;
                map.serialize_entry("scale", scale)?;
                map.end()
            }
            Self::VarChar { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "var_char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct FieldTypeVisitor;

        impl<'de> Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or map representing a FieldType")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                match value {
                    "bool" | "boolean" => Ok(FieldType::Bool),
                    "int" | "integer" => Ok(FieldType::Int),
                    "big_int" | "bigint" => Ok(FieldType::BigInt),
                    "double" | "number" => Ok(FieldType::Double),
                    "text" | "string" => Ok(FieldType::Text),
                    "date" => Ok(FieldType::Date),
                    "timestamp_tz" | "timestamptz" => Ok(FieldType::TimestampTz),
                    "json" => Ok(FieldType::Json),
                    _ => Err(E::custom(format!("unknown simple type: {value}"))),
                }
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut params: HashMap<String, u64> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        params.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;
                let param = |name: &'static str| {
                    params
                        .get(name)
                        .copied()
                        .ok_or_else(|| M::Error::missing_field(name))
                };

                match type_name.as_str() {
                    "decimal" => Ok(FieldType::Decimal {
                        precision: u8::try_from(param("precision")?)
                            .map_err(|_| M::Error::custom("decimal precision out of range"))?,
                        scale: u8::try_from(param("scale")?)
                            .map_err(|_| M::Error::custom("decimal scale out of range"))?,
                    }),
                    "var_char" | "varchar" => Ok(FieldType::VarChar {
                        length: u16::try_from(param("length")?)
                            .map_err(|_| M::Error::custom("var_char length out of range"))?,
                    }),
                    // Simple types are also accepted in map form
                    other => self.visit_str(other),
                }
            }
        }

        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_types_from_yaml() {
        let ty: FieldType = serde_yaml::from_str("int").unwrap();
        assert_eq!(ty, FieldType::Int);
        let ty: FieldType = serde_yaml::from_str("string").unwrap();
        assert_eq!(ty, FieldType::Text);
        let ty: FieldType = serde_yaml::from_str("timestamptz").unwrap();
        assert_eq!(ty, FieldType::TimestampTz);
    }

    #[test]
    fn test_parameterised_types_from_yaml() {
        let ty: FieldType = serde_yaml::from_str("type: var_char\nlength: 32").unwrap();
        assert_eq!(ty, FieldType::VarChar { length: 32 });

        let ty: FieldType =
            serde_yaml::from_str("type: decimal\nprecision: 10\nscale: 2").unwrap();
        assert_eq!(
            ty,
            FieldType::Decimal {
                precision: 10,
                scale: 2
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_yaml::from_str::<FieldType>("geometry").is_err());
        assert!(serde_yaml::from_str::<FieldType>("type: var_char").is_err());
    }

    #[test]
    fn test_serialize_roundtrip_shape() {
        let json = serde_json::to_string(&FieldType::BigInt).unwrap();
        assert_eq!(json, "\"big_int\"");
        assert_eq!(
            serde_json::to_string(&FieldType::VarChar { length: 8 }).unwrap(),
            r#"{"type":"var_char","length":8}"#
        );
    }

    #[test]
    fn test_is_integer() {
        assert!(FieldType::BigInt.is_integer());
        assert!(!FieldType::Double.is_integer());
    }
}
