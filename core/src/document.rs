//! # Source Documents
//!
//! Reading and syntax-level parsing shared by the importers. Every foreign
//! document is normalised to a `serde_json::Value` before it is mapped onto
//! the format's shim structs, so JSON and YAML inputs take the same path.

use crate::error::{AppError, AppResult};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Concrete syntax of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl Syntax {
    /// Selects the syntax from the file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match extension_of(path).as_str() {
            ".json" => Ok(Syntax::Json),
            ".yaml" | ".yml" => Ok(Syntax::Yaml),
            other => Err(AppError::UnsupportedExtension(other.to_string())),
        }
    }
}

/// The extension of `path` including the leading dot, or `""`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Reads a whole file into memory.
pub fn read_source(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| AppError::read_file(path, e))
}

/// Parses `content` as `syntax` into a JSON value.
pub fn parse_value(content: &str, syntax: Syntax) -> AppResult<Value> {
    match syntax {
        Syntax::Json => serde_json::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse JSON: {}", e))),
        Syntax::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| AppError::Parse(format!("Failed to parse YAML: {}", e)))?;
            Ok(yaml_to_json(yaml))
        }
    }
}

/// Converts a YAML tree into JSON.
///
/// Mapping keys are stringified (`200:` becomes `"200"`), tags are dropped and
/// non-finite floats become `null`.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut out = Map::new();
            for (key, v) in mapping {
                out.insert(yaml_key_to_string(key), yaml_to_json(v));
            }
            Value::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
