#![deny(missing_docs)]

//! # Postman Shims
//!
//! Serde structures for the subset of a Postman Collection v2.1 document that
//! is read on import and written on export. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema URL written on export.
pub const COLLECTION_SCHEMA_V21: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root of a collection.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimCollection {
    /// Collection metadata.
    #[serde(default)]
    pub info: ShimInfo,
    /// Top-level requests and folders.
    #[serde(default)]
    pub item: Vec<ShimItem>,
    /// Collection-wide authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<ShimAuth>,
    /// Collection variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<ShimVariable>,
}

/// The `info` block.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimInfo {
    /// Postman-assigned identifier.
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    /// Collection name.
    #[serde(default)]
    pub name: String,
    /// Collection description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ShimDescription>,
    /// Schema URL; required for a document to count as a collection.
    #[serde(default)]
    pub schema: String,
}

/// A request or a folder.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimItem {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Item description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ShimDescription>,
    /// Present on requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ShimRequest>,
    /// Present on folders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<ShimItem>,
}

impl ShimItem {
    /// Folders have children and no request of their own.
    pub fn is_folder(&self) -> bool {
        self.request.is_none() && !self.item.is_empty()
    }
}

/// A request definition.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimRequest {
    /// HTTP method, any case.
    #[serde(default)]
    pub method: String,
    /// Request headers.
    #[serde(default)]
    pub header: Vec<ShimHeader>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ShimBody>,
    /// Target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<ShimUrl>,
    /// Request-level authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<ShimAuth>,
    /// Request description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ShimDescription>,
}

/// Descriptions are either plain text or `{content, type}`.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum ShimDescription {
    /// Plain string.
    Text(String),
    /// Rich description object.
    Rich {
        /// Description body.
        #[serde(default)]
        content: String,
        /// MIME type of the content, e.g. `text/markdown`.
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl ShimDescription {
    /// The description text.
    pub fn text(&self) -> &str {
        match self {
            ShimDescription::Text(text) => text,
            ShimDescription::Rich { content, .. } => content,
        }
    }
}

/// A request header.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimHeader {
    /// Header name.
    #[serde(default)]
    pub key: String,
    /// Header value.
    #[serde(default)]
    pub value: Option<String>,
    /// Disabled headers are not sent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// A request body.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimBody {
    /// `raw`, `urlencoded`, `formdata`, `file` or `graphql`.
    #[serde(default)]
    pub mode: String,
    /// Raw body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// `application/x-www-form-urlencoded` entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urlencoded: Vec<ShimFormParam>,
    /// `multipart/form-data` entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<ShimFormParam>,
    /// Mode-specific options such as the raw language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// One urlencoded or form-data entry.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimFormParam {
    /// Field name.
    #[serde(default)]
    pub key: String,
    /// Sample value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// `text` or `file` for form-data.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Disabled entries are not sent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl ShimFormParam {
    /// Whether the entry carries a non-empty sample value.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// A request URL: a bare string or a structured object.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum ShimUrl {
    /// Raw URL string.
    Raw(String),
    /// Structured URL.
    Detailed(ShimUrlObject),
}

impl ShimUrl {
    /// The raw URL text, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            ShimUrl::Raw(raw) => Some(raw),
            ShimUrl::Detailed(object) => object.raw.as_deref(),
        }
    }

    /// The `path[]` segments as strings.
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            ShimUrl::Raw(_) => Vec::new(),
            ShimUrl::Detailed(object) => match &object.path {
                Some(Value::Array(items)) => items.iter().filter_map(segment_text).collect(),
                Some(Value::String(path)) => path
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            },
        }
    }

    /// Query entries (empty for raw strings).
    pub fn query(&self) -> &[ShimQuery] {
        match self {
            ShimUrl::Raw(_) => &[],
            ShimUrl::Detailed(object) => &object.query,
        }
    }

    /// Path variables (empty for raw strings).
    pub fn variables(&self) -> &[ShimVariable] {
        match self {
            ShimUrl::Raw(_) => &[],
            ShimUrl::Detailed(object) => &object.variable,
        }
    }
}

/// Path segments are strings or `{type, value}` objects.
fn segment_text(segment: &Value) -> Option<String> {
    match segment {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Structured URL object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimUrlObject {
    /// The full URL as typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Host segments (array or string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Value>,
    /// Path segments (array or string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    /// Query parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<ShimQuery>,
    /// Path variables (`:name` segments).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<ShimVariable>,
}

/// A query parameter.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimQuery {
    /// Parameter name.
    #[serde(default)]
    pub key: Option<String>,
    /// Sample value.
    #[serde(default)]
    pub value: Option<String>,
    /// Disabled parameters are not sent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// A collection or path variable.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimVariable {
    /// Variable name.
    #[serde(default)]
    pub key: String,
    /// Sample value; any JSON scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ShimVariable {
    /// The sample value rendered as text; `""` when absent or null.
    pub fn value_text(&self) -> String {
        match &self.value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// An auth block; only the type is consulted.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimAuth {
    /// `bearer`, `basic`, `apikey`, `oauth2`, `noauth`, ...
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ShimAuth {
    /// Whether this block actually requires credentials.
    pub fn is_active(&self) -> bool {
        !self.kind.is_empty() && self.kind != "noauth"
    }
}
