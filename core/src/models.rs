#![deny(missing_docs)]

//! # API Model
//!
//! The canonical representation every importer produces and every exporter
//! consumes. It is also the shape of the native `api.yaml` file.

use crate::field::FieldMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL used when a source document does not provide one.
pub const DEFAULT_BASE_URL: &str = "/api/v1";

/// Authentication scheme of the whole API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// No authentication.
    #[default]
    None,
    /// Bearer token (also used for OAuth1/OAuth2).
    #[serde(alias = "oauth2", alias = "oauth1")]
    Bearer,
    /// HTTP basic authentication.
    Basic,
    /// API key header.
    #[serde(rename = "apikey", alias = "api_key")]
    ApiKey,
}

impl AuthType {
    /// The serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::Bearer => "bearer",
            AuthType::Basic => "basic",
            AuthType::ApiKey => "apikey",
        }
    }

    /// Maps a Postman `auth.type` string. OAuth flavours collapse to bearer.
    pub fn from_postman(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "bearer" | "oauth1" | "oauth2" => AuthType::Bearer,
            "basic" => AuthType::Basic,
            "apikey" => AuthType::ApiKey,
            _ => AuthType::None,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    /// URL path prefix shared by every endpoint (e.g. `/api/v1`).
    #[serde(default)]
    pub base_url: String,
    /// Authentication scheme.
    #[serde(default)]
    pub auth_type: AuthType,
    /// Endpoints; treated as a set keyed by method and path.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl Default for Api {
    /// The empty baseline: default base URL, no auth, no endpoints.
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_type: AuthType::None,
            endpoints: Vec::new(),
        }
    }
}

/// A single operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path template, e.g. `/users/{id}`.
    #[serde(default)]
    pub path: String,
    /// Upper-case HTTP verb.
    #[serde(default)]
    pub method: String,
    /// Human summary.
    #[serde(default)]
    pub description: String,
    /// Whether this endpoint requires authentication.
    #[serde(default)]
    pub auth: bool,
    /// Request parameters and body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<EndpointRequest>,
    /// Success response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<EndpointResponse>,
    /// Additional non-2xx responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorResponse>,
}

impl Endpoint {
    /// Creates an endpoint with an upper-cased method.
    pub fn new(method: &str, path: impl Into<String>) -> Self {
        Self {
            method: method.to_uppercase(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Merge key: `"<METHOD>:<path>"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.method, self.path)
    }
}

/// Path, query and body fields of a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EndpointRequest {
    /// Path parameters.
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub params: FieldMap,
    /// Query-string parameters.
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub query: FieldMap,
    /// Body fields.
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub body: FieldMap,
}

/// Success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body fields.
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub body: FieldMap,
}

impl EndpointResponse {
    /// A response with `status` and no body fields.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: FieldMap::new(),
        }
    }
}

/// A documented error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable code.
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_key() {
        let ep = Endpoint::new("get", "/users/{id}");
        assert_eq!(ep.method, "GET");
        assert_eq!(ep.key(), "GET:/users/{id}");
    }

    #[test]
    fn test_postman_auth_mapping() {
        assert_eq!(AuthType::from_postman("oauth2"), AuthType::Bearer);
        assert_eq!(AuthType::from_postman("OAuth1"), AuthType::Bearer);
        assert_eq!(AuthType::from_postman("basic"), AuthType::Basic);
        assert_eq!(AuthType::from_postman("apikey"), AuthType::ApiKey);
        assert_eq!(AuthType::from_postman("noauth"), AuthType::None);
        assert_eq!(AuthType::from_postman("digest"), AuthType::None);
    }

    #[test]
    fn test_default_baseline() {
        let api = Api::default();
        assert_eq!(api.base_url, "/api/v1");
        assert_eq!(api.auth_type, AuthType::None);
        assert!(api.endpoints.is_empty());
    }
}
