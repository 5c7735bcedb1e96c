#![deny(missing_docs)]

//! # Field Descriptors
//!
//! A field descriptor carries three facts about one request/response field:
//! its type tag, whether it is required, and an optional validation hint.
//!
//! On disk it keeps the compact form `"<type>, required|optional[, <hint>]"`;
//! in memory it is always the structured [`FieldDescriptor`]. This module also
//! holds the two mappings between type tags and JSON-schema `type`/`format`.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Ordered map of field name to descriptor.
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// Semantic type tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// 8-4-4-4-12 hex identifier.
    Uuid,
    /// Timestamp or date.
    DateTime,
    /// Nested JSON object.
    Object,
    /// JSON array.
    Array,
    /// File upload (multipart).
    File,
}

impl FieldType {
    /// The tag used in the compact encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Uuid => "uuid",
            FieldType::DateTime => "datetime",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::File => "file",
        }
    }

    /// JSON-schema `type` used when rendering this tag into OpenAPI.
    ///
    /// `uuid` and `datetime` collapse to `string`, `integer` widens to `number`.
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            FieldType::Uuid | FieldType::DateTime => "string",
            FieldType::Integer | FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::String | FieldType::File => "string",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "integer" => Ok(FieldType::Integer),
            "number" => Ok(FieldType::Number),
            "boolean" => Ok(FieldType::Boolean),
            "uuid" => Ok(FieldType::Uuid),
            "datetime" => Ok(FieldType::DateTime),
            "object" => Ok(FieldType::Object),
            "array" => Ok(FieldType::Array),
            "file" => Ok(FieldType::File),
            other => Err(AppError::Parse(format!("unknown field type '{}'", other))),
        }
    }
}

/// Structured `(type, required, validation)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Type tag.
    pub ty: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Opaque validation hint, e.g. `email` or `min:8`.
    pub validation: Option<String>,
}

impl FieldDescriptor {
    /// A required field of type `ty`.
    pub fn required(ty: FieldType) -> Self {
        Self {
            ty,
            required: true,
            validation: None,
        }
    }

    /// An optional field of type `ty`.
    pub fn optional(ty: FieldType) -> Self {
        Self {
            ty,
            required: false,
            validation: None,
        }
    }

    /// Builds a descriptor with the given requiredness.
    pub fn new(ty: FieldType, required: bool) -> Self {
        Self {
            ty,
            required,
            validation: None,
        }
    }

    /// Attaches a validation hint.
    pub fn with_validation(mut self, hint: impl Into<String>) -> Self {
        self.validation = Some(hint.into());
        self
    }
}

impl Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requiredness = if self.required { "required" } else { "optional" };
        write!(f, "{}, {}", self.ty, requiredness)?;
        if let Some(hint) = &self.validation {
            write!(f, ", {}", hint)?;
        }
        Ok(())
    }
}

impl FromStr for FieldDescriptor {
    type Err = AppError;

    /// Decodes `"<type>[, required|optional][, <hint>...]"`.
    ///
    /// The first `required`/`optional` token wins; every other token is part
    /// of the validation hint. Missing requiredness means optional.
    fn from_str(s: &str) -> AppResult<Self> {
        let mut parts = s.split(',').map(str::trim);
        let ty: FieldType = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Parse(format!("empty field descriptor '{}'", s)))?
            .parse()?;

        let mut required = None;
        let mut hints = Vec::new();
        for part in parts.filter(|p| !p.is_empty()) {
            match part {
                "required" if required.is_none() => required = Some(true),
                "optional" if required.is_none() => required = Some(false),
                other => hints.push(other),
            }
        }

        Ok(Self {
            ty,
            required: required.unwrap_or(false),
            validation: if hints.is_empty() {
                None
            } else {
                Some(hints.join(", "))
            },
        })
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e: AppError| serde::de::Error::custom(format!("field '{}': {}", raw, e)))
    }
}

/// Maps a JSON-schema node to a type tag.
///
/// `format` overrides `type` for `uuid` and `date-time`; `email` stays a
/// plain string since it is a validation concern. Anything unrecognised
/// (including `$ref`-only schemas) is `string`.
pub fn schema_to_field_type(schema: &Value) -> FieldType {
    match schema.get("format").and_then(Value::as_str) {
        Some("uuid") => return FieldType::Uuid,
        Some("date-time") => return FieldType::DateTime,
        _ => {}
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("integer") | Some("number") => FieldType::Integer,
        Some("boolean") => FieldType::Boolean,
        Some("array") => FieldType::Array,
        Some("object") => FieldType::Object,
        _ => FieldType::String,
    }
}

/// Reads `properties` and `required` of an object schema into a [`FieldMap`].
///
/// Non-object schemas yield an empty map.
pub fn schema_to_fields(schema: &Value) -> FieldMap {
    let mut fields = FieldMap::new();
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return fields;
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, prop) in properties {
        let descriptor =
            FieldDescriptor::new(schema_to_field_type(prop), required.contains(&name.as_str()));
        fields.insert(name.clone(), descriptor);
    }
    fields
}

/// Builds a JSON object schema (`type`, `properties`, `required`) from a [`FieldMap`].
///
/// The `required` list is only emitted when at least one field is required.
pub fn fields_to_schema(fields: &FieldMap) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for (name, descriptor) in fields {
        properties.insert(
            name.clone(),
            serde_json::json!({ "type": descriptor.ty.json_schema_type() }),
        );
        if descriptor.required {
            required.push(Value::String(name.clone()));
        }
    }

    let mut schema = serde_json::Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_decoding() {
        let d: FieldDescriptor = "string, required, email".parse().unwrap();
        assert_eq!(d.ty, FieldType::String);
        assert!(d.required);
        assert_eq!(d.validation.as_deref(), Some("email"));

        let d: FieldDescriptor = "integer".parse().unwrap();
        assert_eq!(d, FieldDescriptor::optional(FieldType::Integer));

        let d: FieldDescriptor = "uuid, optional".parse().unwrap();
        assert_eq!(d, FieldDescriptor::optional(FieldType::Uuid));
    }

    #[test]
    fn test_requiredness_anywhere_in_list() {
        let d: FieldDescriptor = "string, min:8, required".parse().unwrap();
        assert!(d.required);
        assert_eq!(d.validation.as_deref(), Some("min:8"));
    }

    #[test]
    fn test_descriptor_encoding() {
        assert_eq!(
            FieldDescriptor::required(FieldType::DateTime).to_string(),
            "datetime, required"
        );
        assert_eq!(
            FieldDescriptor::optional(FieldType::String)
                .with_validation("min:8")
                .to_string(),
            "string, optional, min:8"
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            "varchar, required".parse::<FieldDescriptor>(),
            Err(AppError::Parse(_))
        ));
        assert!("".parse::<FieldDescriptor>().is_err());
    }

    #[test]
    fn test_schema_type_mapping() {
        let cases = vec![
            (json!({"type": "integer"}), FieldType::Integer),
            (json!({"type": "number"}), FieldType::Integer),
            (json!({"type": "boolean"}), FieldType::Boolean),
            (json!({"type": "array"}), FieldType::Array),
            (json!({"type": "object"}), FieldType::Object),
            (json!({"type": "string"}), FieldType::String),
            (json!({"type": "string", "format": "uuid"}), FieldType::Uuid),
            (
                json!({"type": "string", "format": "date-time"}),
                FieldType::DateTime,
            ),
            (json!({"type": "string", "format": "email"}), FieldType::String),
            (json!({"$ref": "#/components/schemas/User"}), FieldType::String),
        ];

        for (schema, expected) in cases {
            assert_eq!(schema_to_field_type(&schema), expected, "{}", schema);
        }
    }

    #[test]
    fn test_schema_to_fields_required_list() {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "string", "format": "uuid"},
                "age": {"type": "integer"}
            }
        });
        let fields = schema_to_fields(&schema);
        assert_eq!(fields["id"], FieldDescriptor::required(FieldType::Uuid));
        assert_eq!(fields["age"], FieldDescriptor::optional(FieldType::Integer));
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["id", "age"],
            "document order is kept"
        );
    }

    #[test]
    fn test_fields_to_schema() {
        let mut fields = FieldMap::new();
        fields.insert("id".into(), FieldDescriptor::required(FieldType::Uuid));
        fields.insert("count".into(), FieldDescriptor::optional(FieldType::Integer));

        let schema = fields_to_schema(&fields);
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "count": {"type": "number"}
                },
                "required": ["id"]
            })
        );

        let empty = fields_to_schema(&FieldMap::new());
        assert!(empty.get("required").is_none());
    }
}
