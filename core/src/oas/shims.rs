#![deny(missing_docs)]

//! # OpenAPI Shims
//!
//! Serde structures covering the subset of an OpenAPI 3.0 document that is
//! read on import and written on export. Schemas stay raw JSON values.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// HTTP methods that may appear as operation keys in a Path Item.
pub const OPERATION_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Root document.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimOpenApi {
    /// Spec version string.
    #[serde(default)]
    pub openapi: String,
    /// Document metadata.
    #[serde(default)]
    pub info: ShimInfo,
    /// Server list; only the first entry is consulted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ShimServer>,
    /// Path templates to Path Items, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, ShimPathItem>,
    /// Reusable components (only security schemes are written).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ShimComponents>,
}

/// The Info Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimInfo {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version.
    #[serde(default)]
    pub version: String,
}

/// A Server Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimServer {
    /// Absolute URL or path.
    #[serde(default)]
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Path Item, reduced to its operations keyed by lower-case method.
///
/// Keys such as `parameters`, `summary` or `x-*` are skipped on input.
#[derive(Clone, Debug, Default)]
pub struct ShimPathItem {
    /// Operations in document order.
    pub operations: IndexMap<String, ShimOperation>,
}

impl<'de> Deserialize<'de> for ShimPathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut operations = IndexMap::new();

        for (key, value) in raw {
            let method = key.to_ascii_lowercase();
            if !OPERATION_METHODS.contains(&method.as_str()) {
                debug!(key = %key, "Skipping non-operation path item key");
                continue;
            }
            let operation = serde_json::from_value::<ShimOperation>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
            })?;
            operations.insert(method, operation);
        }

        Ok(Self { operations })
    }
}

impl Serialize for ShimPathItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.operations.len()))?;
        for (method, operation) in &self.operations {
            map.serialize_entry(method, operation)?;
        }
        map.end()
    }
}

/// An Operation Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimOperation {
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operation-level parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ShimParameter>,
    /// Request body.
    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<ShimRequestBody>,
    /// Responses keyed by status code (or `default`).
    #[serde(default)]
    pub responses: IndexMap<String, ShimResponse>,
    /// Security requirements; an empty list means public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Value>>,
}

impl ShimOperation {
    /// Whether the operation declares at least one security requirement.
    pub fn is_secured(&self) -> bool {
        self.security.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// A Parameter Object. `$ref` parameters deserialize with an empty name.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimParameter {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in", default)]
    pub location: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// A Request Body Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimRequestBody {
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media types.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// A Response Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimResponse {
    /// Response description.
    #[serde(default)]
    pub description: String,
    /// Media types.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Media Type Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimMediaType {
    /// Schema of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Picks the JSON media type if one exists, else the first one.
pub fn preferred_media_type(content: &IndexMap<String, ShimMediaType>) -> Option<&ShimMediaType> {
    content
        .iter()
        .find(|(media_type, _)| media_type.contains("json"))
        .or_else(|| content.first())
        .map(|(_, media)| media)
}

/// The Components Object, reduced to security schemes.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimComponents {
    /// Named security schemes.
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, ShimSecurityScheme>,
}

/// A Security Scheme Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimSecurityScheme {
    /// Scheme type, e.g. `http` or `apiKey`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// HTTP auth scheme, e.g. `bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format hint.
    #[serde(
        rename = "bearerFormat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bearer_format: Option<String>,
}
