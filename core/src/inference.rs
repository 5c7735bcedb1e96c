#![deny(missing_docs)]

//! # Type Inference
//!
//! Infers a field type tag from a sample JSON value, as found in Postman raw
//! request bodies.

use crate::field::{FieldDescriptor, FieldMap, FieldType};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("Invalid regex")
    })
}

fn datetime_regexes() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // ISO 8601
            Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex"),
            // SQL datetime
            Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").expect("Invalid regex"),
            // Slash date
            Regex::new(r"\d{4}/\d{2}/\d{2}").expect("Invalid regex"),
        ]
    })
}

/// Whether `s` is a canonical 8-4-4-4-12 UUID (any case).
pub fn looks_like_uuid(s: &str) -> bool {
    uuid_regex().is_match(s)
}

/// Whether `s` contains an ISO-8601, SQL-style or `YYYY/MM/DD` timestamp.
pub fn looks_like_datetime(s: &str) -> bool {
    datetime_regexes().iter().any(|re| re.is_match(s))
}

/// Infers the type tag of a sample value. Never fails.
///
/// Email-looking strings stay `string`; email is a validation concern.
pub fn infer_type(value: &Value) -> FieldType {
    match value {
        Value::String(s) if looks_like_uuid(s) => FieldType::Uuid,
        Value::String(s) if looks_like_datetime(s) => FieldType::DateTime,
        Value::String(_) => FieldType::String,
        Value::Number(n) if n.is_i64() || n.is_u64() => FieldType::Integer,
        Value::Number(_) => FieldType::Number,
        Value::Bool(_) => FieldType::Boolean,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
        Value::Null => FieldType::String,
    }
}

/// Turns the top-level keys of a JSON object into required fields.
///
/// Returns `None` when `value` is not an object.
pub fn infer_fields(value: &Value) -> Option<FieldMap> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, v)| (key.clone(), FieldDescriptor::required(infer_type(v))))
            .collect(),
    )
}
