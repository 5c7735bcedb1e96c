#![deny(missing_docs)]

//! # Postman Import
//!
//! Flattens a Postman Collection v2.1 into the canonical [`Api`].
//!
//! Folders are walked depth-first in document order. Paths come from the raw
//! URL (or the `path[]` segments), with `{{var}}` and `:var` rewritten to
//! `{var}`. Request bodies are typed by sampling their JSON values.

use crate::document::read_source;
use crate::error::{AppError, AppResult};
use crate::field::{FieldDescriptor, FieldMap, FieldType};
use crate::importer::{validate_endpoints, Importer};
use crate::inference::infer_fields;
use crate::models::{Api, AuthType, Endpoint, EndpointRequest, EndpointResponse, DEFAULT_BASE_URL};
use crate::paths::{common_path_prefix, join_segments, substitute_variables, url_path};
use crate::postman::shims::{ShimBody, ShimCollection, ShimItem, ShimRequest, ShimUrl};
use std::path::Path;
use tracing::{debug, info, warn};

/// Folder nesting beyond this depth is not traversed.
pub const MAX_FOLDER_DEPTH: usize = 64;

/// Requests sampled when inferring the base URL from paths.
const BASE_URL_SAMPLE: usize = 5;

/// Importer for Postman Collection v2.1 JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostmanImporter;

impl Importer for PostmanImporter {
    fn import(&self, path: &Path) -> AppResult<Api> {
        info!(file = ?path, "Importing Postman collection");
        let content = read_source(path)?;
        let api = parse_collection(&content)?;
        info!(
            endpoints = api.endpoints.len(),
            base_url = %api.base_url,
            auth_type = %api.auth_type,
            "Postman import complete"
        );
        Ok(api)
    }

    fn validate(&self, api: &Api) -> AppResult<()> {
        validate_endpoints(api)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".json"]
    }
}

/// Parses collection JSON text into the canonical model.
pub fn parse_collection(content: &str) -> AppResult<Api> {
    let collection: ShimCollection = serde_json::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse Postman collection JSON: {}", e)))?;
    collection_to_api(&collection)
}

/// Converts a deserialized collection.
pub fn collection_to_api(collection: &ShimCollection) -> AppResult<Api> {
    if collection.info.schema.trim().is_empty() {
        return Err(AppError::InvalidCollection("missing schema".into()));
    }

    let requests = collect_requests(&collection.item);
    debug!(count = requests.len(), "Collected Postman requests");

    let variables: Vec<(String, String)> = collection
        .variable
        .iter()
        .map(|v| (v.key.clone(), v.value_text()))
        .collect();
    let context = Context {
        collection,
        variables: &variables,
    };

    let endpoints = requests
        .iter()
        .filter_map(|item| item.request.as_ref().map(|request| (*item, request)))
        .map(|(item, request)| context.convert_request(item, request))
        .collect();

    Ok(Api {
        base_url: context.infer_base_url(&requests),
        auth_type: context.determine_auth_type(&requests),
        endpoints,
    })
}

/// Depth-first list of request items in document order.
pub fn collect_requests(items: &[ShimItem]) -> Vec<&ShimItem> {
    let mut out = Vec::new();
    walk(items, 0, &mut out);
    out
}

fn walk<'a>(items: &'a [ShimItem], depth: usize, out: &mut Vec<&'a ShimItem>) {
    if depth >= MAX_FOLDER_DEPTH {
        warn!(depth, "Folder nesting too deep, skipping remaining items");
        return;
    }
    for item in items {
        if item.request.is_some() {
            out.push(item);
        } else if item.is_folder() {
            walk(&item.item, depth + 1, out);
        }
    }
}

struct Context<'a> {
    collection: &'a ShimCollection,
    variables: &'a [(String, String)],
}

impl Context<'_> {
    fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn extract_path(&self, url: &ShimUrl) -> Option<String> {
        let path = url
            .raw()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(url_path)
            .or_else(|| join_segments(&url.path_segments()))?;
        Some(substitute_variables(&path, self.vars()))
    }

    fn convert_request(&self, item: &ShimItem, request: &ShimRequest) -> Endpoint {
        let mut endpoint = Endpoint::new(&request.method, "");
        endpoint.description = request
            .description
            .as_ref()
            .map(|d| d.text())
            .filter(|text| !text.is_empty())
            .unwrap_or(item.name.as_str())
            .to_string();
        endpoint.auth = self.request_requires_auth(request);

        let mut endpoint_request = None;
        if let Some(url) = &request.url {
            endpoint.path = self.extract_path(url).unwrap_or_default();

            let mut req = EndpointRequest::default();
            for variable in url.variables() {
                req.params
                    .insert(variable.key.clone(), FieldDescriptor::required(FieldType::String));
            }
            for query in url.query().iter().filter(|q| !q.disabled) {
                let Some(key) = query.key.as_deref().filter(|k| !k.is_empty()) else {
                    continue;
                };
                let has_value = query.value.as_deref().is_some_and(|v| !v.is_empty());
                req.query
                    .insert(key.to_string(), FieldDescriptor::new(FieldType::String, has_value));
            }
            endpoint_request = Some(req);
        } else {
            debug!(name = %item.name, "Request has no URL");
        }

        if let Some(body) = &request.body {
            if endpoint.method != "GET" && endpoint.method != "DELETE" {
                endpoint_request
                    .get_or_insert_with(EndpointRequest::default)
                    .body
                    .extend(parse_body(body));
            }
        }
        endpoint.request = endpoint_request;

        let status = match endpoint.method.as_str() {
            "POST" => 201,
            "DELETE" => 204,
            _ => 200,
        };
        endpoint.response = Some(EndpointResponse::empty(status));
        endpoint
    }

    fn request_requires_auth(&self, request: &ShimRequest) -> bool {
        if let Some(auth) = &request.auth {
            return auth.is_active();
        }
        if let Some(auth) = &self.collection.auth {
            return auth.is_active();
        }
        request
            .header
            .iter()
            .filter(|header| !header.disabled)
            .any(|header| {
                let key = header.key.to_ascii_lowercase();
                key == "authorization" || key == "x-api-key"
            })
    }

    /// Variable path, then the common prefix of the first requests, then the default.
    fn infer_base_url(&self, requests: &[&ShimItem]) -> String {
        for (key, value) in self.vars() {
            let key = key.to_ascii_lowercase();
            if !(key.contains("url") || key.contains("host") || key.contains("base")) {
                continue;
            }
            if let Some(path) = url_path(value).filter(|p| !p.is_empty() && p != "/") {
                debug!(variable = %key, base_url = %path, "Base URL from collection variable");
                return path;
            }
        }

        let paths: Vec<String> = requests
            .iter()
            .take(BASE_URL_SAMPLE)
            .filter_map(|item| item.request.as_ref()?.url.as_ref())
            .filter_map(|url| self.extract_path(url))
            .filter(|path| !path.is_empty())
            .collect();

        common_path_prefix(&paths).unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Request auth, then collection auth, then a header scan.
    fn determine_auth_type(&self, requests: &[&ShimItem]) -> AuthType {
        let from_requests = requests
            .iter()
            .filter_map(|item| item.request.as_ref()?.auth.as_ref())
            .map(|auth| AuthType::from_postman(&auth.kind))
            .find(|auth_type| *auth_type != AuthType::None);
        if let Some(auth_type) = from_requests {
            return auth_type;
        }

        if let Some(auth) = &self.collection.auth {
            return AuthType::from_postman(&auth.kind);
        }

        requests
            .iter()
            .filter_map(|item| item.request.as_ref())
            .flat_map(|request| request.header.iter())
            .filter(|header| !header.disabled)
            .find_map(|header| {
                let key = header.key.to_ascii_lowercase();
                let value = header.value.as_deref().unwrap_or_default().to_ascii_lowercase();
                if key == "authorization" && value.contains("bearer") {
                    Some(AuthType::Bearer)
                } else if key == "authorization" && value.contains("basic") {
                    Some(AuthType::Basic)
                } else if key == "x-api-key" {
                    Some(AuthType::ApiKey)
                } else {
                    None
                }
            })
            .unwrap_or_default()
    }
}

/// Field map for a request body, by mode.
fn parse_body(body: &ShimBody) -> FieldMap {
    let mut fields = FieldMap::new();
    match body.mode.as_str() {
        "raw" => {
            let raw = body.raw.as_deref().unwrap_or_default();
            if raw.trim().is_empty() {
                return fields;
            }
            match serde_json::from_str::<serde_json::Value>(raw)
                .ok()
                .as_ref()
                .and_then(infer_fields)
            {
                Some(inferred) => fields = inferred,
                None => {
                    debug!("Raw body is not a JSON object, using a generic body field");
                    fields.insert("body".into(), FieldDescriptor::required(FieldType::Object));
                }
            }
        }
        "urlencoded" => {
            for param in body.urlencoded.iter().filter(|p| !p.disabled) {
                fields.insert(
                    param.key.clone(),
                    FieldDescriptor::new(FieldType::String, param.has_value()),
                );
            }
        }
        "formdata" => {
            for param in body.formdata.iter().filter(|p| !p.disabled) {
                let ty = if param.kind.as_deref() == Some("file") {
                    FieldType::File
                } else {
                    FieldType::String
                };
                fields.insert(param.key.clone(), FieldDescriptor::new(ty, param.has_value()));
            }
        }
        "file" => {
            fields.insert("file".into(), FieldDescriptor::required(FieldType::File));
        }
        other => debug!(mode = %other, "Ignoring body mode"),
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn collection(value: serde_json::Value) -> AppResult<Api> {
        parse_collection(&value.to_string())
    }

    fn schema() -> serde_json::Value {
        json!("https://schema.getpostman.com/json/collection/v2.1.0/collection.json")
    }

    #[test]
    fn test_missing_schema_is_invalid() {
        let err = collection(json!({"info": {"name": "x"}, "item": []})).unwrap_err();
        assert!(matches!(err, AppError::InvalidCollection(_)));
        let err = collection(json!({"item": []})).unwrap_err();
        assert!(matches!(err, AppError::InvalidCollection(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            parse_collection("{not json"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_folders_flatten_in_order() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [
                {"name": "Users", "item": [
                    {"name": "List users", "request": {"method": "get", "url": "https://x.dev/api/v1/users"}},
                    {"name": "Nested", "item": [
                        {"name": "Get user", "request": {"method": "GET", "url": {
                            "raw": "https://x.dev/api/v1/users/:id",
                            "variable": [{"key": "id", "value": "1"}]
                        }}}
                    ]}
                ]},
                {"name": "Orders", "request": {"method": "GET", "url": {"raw": "https://x.dev/api/v1/orders"}}},
                {"name": "Empty folder", "item": []}
            ]
        }))
        .unwrap();

        let keys: Vec<String> = api.endpoints.iter().map(Endpoint::key).collect();
        assert_eq!(
            keys,
            vec![
                "GET:/api/v1/users",
                "GET:/api/v1/users/{id}",
                "GET:/api/v1/orders"
            ]
        );
        assert_eq!(api.base_url, "/api/v1");
        assert_eq!(api.endpoints[0].description, "List users");
        assert_eq!(
            api.endpoints[1].request.as_ref().unwrap().params["id"],
            FieldDescriptor::required(FieldType::String)
        );
    }

    #[test]
    fn test_base_url_from_variable() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "variable": [
                {"key": "token", "value": "abc"},
                {"key": "baseUrl", "value": "https://api.example.com/v2"}
            ],
            "item": [{"name": "x", "request": {"method": "GET", "url": "{{baseUrl}}/users"}}]
        }))
        .unwrap();
        assert_eq!(api.base_url, "/v2");
        assert_eq!(api.endpoints[0].path, "/users");
    }

    #[test]
    fn test_base_url_defaults() {
        let api = collection(json!({"info": {"schema": schema()}, "item": []})).unwrap();
        assert_eq!(api.base_url, "/api/v1");
        assert_eq!(api.auth_type, AuthType::None);
        assert!(api.endpoints.is_empty());
    }

    #[test]
    fn test_variable_substitution() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "variable": [
                {"key": "version", "value": "v3"},
                {"key": "userId", "value": "42"}
            ],
            "item": [{"name": "x", "request": {"method": "GET",
                "url": {"raw": "https://x.dev/{{version}}/users/{{userId}}"}}}]
        }))
        .unwrap();
        assert_eq!(api.endpoints[0].path, "/v3/users/{userId}");
    }

    #[test]
    fn test_path_segments_fallback() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [{"name": "x", "request": {"method": "GET",
                "url": {"path": ["api", "items", ":itemId"]}}}]
        }))
        .unwrap();
        assert_eq!(api.endpoints[0].path, "/api/items/{itemId}");
    }

    #[test]
    fn test_request_auth_precedes_collection_auth() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "auth": {"type": "basic"},
            "item": [
                {"name": "public", "request": {"method": "GET", "url": "/health", "auth": {"type": "noauth"}}},
                {"name": "secure", "request": {"method": "GET", "url": "/me", "auth": {"type": "oauth2"}}},
                {"name": "inherits", "request": {"method": "GET", "url": "/orders"}}
            ]
        }))
        .unwrap();
        assert_eq!(api.auth_type, AuthType::Bearer);
        let flags: Vec<bool> = api.endpoints.iter().map(|e| e.auth).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_collection_auth_and_header_scan() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "auth": {"type": "apikey"},
            "item": [{"name": "x", "request": {"method": "GET", "url": "/x"}}]
        }))
        .unwrap();
        assert_eq!(api.auth_type, AuthType::ApiKey);

        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [
                {"name": "a", "request": {"method": "GET", "url": "/a"}},
                {"name": "b", "request": {"method": "GET", "url": "/b", "header": [
                    {"key": "Authorization", "value": "Basic dXNlcjpwYXNz"}
                ]}}
            ]
        }))
        .unwrap();
        assert_eq!(api.auth_type, AuthType::Basic);
        assert!(!api.endpoints[0].auth);
        assert!(api.endpoints[1].auth);
    }

    #[test]
    fn test_api_key_header() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [{"name": "x", "request": {"method": "GET", "url": "/x", "header": [
                {"key": "X-API-Key", "value": "{{apiKey}}"}
            ]}}]
        }))
        .unwrap();
        assert_eq!(api.auth_type, AuthType::ApiKey);
        assert!(api.endpoints[0].auth);
    }

    #[test]
    fn test_disabled_auth_header_is_ignored() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [{"name": "x", "request": {"method": "GET", "url": "/x", "header": [
                {"key": "Authorization", "value": "Bearer abc", "disabled": true}
            ]}}]
        }))
        .unwrap();
        assert_eq!(api.auth_type, AuthType::None);
        assert!(!api.endpoints[0].auth);
    }

    #[test]
    fn test_raw_body_inference() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [
                {"name": "create", "request": {"method": "POST", "url": "/users", "body": {
                    "mode": "raw",
                    "raw": "{\"email\": \"a@b.co\", \"age\": 30, \"id\": \"123e4567-e89b-12d3-a456-426614174000\", \"at\": \"2024-01-15T10:00:00Z\"}"
                }}},
                {"name": "broken", "request": {"method": "PUT", "url": "/users/1", "body": {
                    "mode": "raw", "raw": "not json"
                }}},
                {"name": "remove", "request": {"method": "DELETE", "url": "/users/1", "body": {
                    "mode": "raw", "raw": "{\"ignored\": true}"
                }}}
            ]
        }))
        .unwrap();

        let create = &api.endpoints[0];
        let body = &create.request.as_ref().unwrap().body;
        assert_eq!(body["email"].to_string(), "string, required");
        assert_eq!(body["age"].to_string(), "integer, required");
        assert_eq!(body["id"].to_string(), "uuid, required");
        assert_eq!(body["at"].to_string(), "datetime, required");
        assert_eq!(create.response.as_ref().unwrap().status, 201);

        let broken = &api.endpoints[1];
        assert_eq!(
            broken.request.as_ref().unwrap().body["body"],
            FieldDescriptor::required(FieldType::Object)
        );
        assert_eq!(broken.response.as_ref().unwrap().status, 200);

        let remove = &api.endpoints[2];
        assert!(remove.request.as_ref().unwrap().body.is_empty());
        assert_eq!(remove.response.as_ref().unwrap().status, 204);
    }

    #[test]
    fn test_form_bodies_and_query() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [{"name": "upload", "request": {
                "method": "POST",
                "url": {"raw": "/files?tag=a&page=", "query": [
                    {"key": "tag", "value": "a"},
                    {"key": "page", "value": ""},
                    {"key": "off", "value": "1", "disabled": true}
                ]},
                "body": {"mode": "formdata", "formdata": [
                    {"key": "title", "value": "Doc", "type": "text"},
                    {"key": "attachment", "type": "file"},
                    {"key": "skip", "value": "x", "disabled": true}
                ]}
            }}]
        }))
        .unwrap();

        let request = api.endpoints[0].request.as_ref().unwrap();
        assert_eq!(request.query.len(), 2);
        assert!(request.query["tag"].required);
        assert!(!request.query["page"].required);
        assert_eq!(request.body["title"], FieldDescriptor::required(FieldType::String));
        assert_eq!(request.body["attachment"], FieldDescriptor::optional(FieldType::File));
        assert!(!request.body.contains_key("skip"));
        assert_eq!(api.endpoints[0].path, "/files");
    }

    #[test]
    fn test_urlencoded_body() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [{"name": "login", "request": {"method": "POST", "url": "/login",
                "body": {"mode": "urlencoded", "urlencoded": [
                    {"key": "user", "value": "bob"},
                    {"key": "remember"}
                ]}}}]
        }))
        .unwrap();
        let body = &api.endpoints[0].request.as_ref().unwrap().body;
        assert!(body["user"].required);
        assert!(!body["remember"].required);
    }

    #[test]
    fn test_description_prefers_request_description() {
        let api = collection(json!({
            "info": {"schema": schema()},
            "item": [
                {"name": "Name", "request": {"method": "GET", "url": "/a",
                    "description": {"content": "From request", "type": "text/plain"}}},
                {"name": "Fallback", "request": {"method": "GET", "url": "/b", "description": ""}}
            ]
        }))
        .unwrap();
        assert_eq!(api.endpoints[0].description, "From request");
        assert_eq!(api.endpoints[1].description, "Fallback");
    }

    #[test]
    fn test_depth_bound() {
        fn nest(levels: usize) -> Vec<ShimItem> {
            let mut items = vec![ShimItem {
                name: "leaf".into(),
                request: Some(ShimRequest {
                    method: "GET".into(),
                    ..Default::default()
                }),
                ..Default::default()
            }];
            for _ in 0..levels {
                items = vec![ShimItem {
                    name: "folder".into(),
                    item: items,
                    ..Default::default()
                }];
            }
            items
        }

        assert!(collect_requests(&nest(MAX_FOLDER_DEPTH + 1)).is_empty());
        assert_eq!(collect_requests(&nest(MAX_FOLDER_DEPTH - 1)).len(), 1);
    }
}
