#![deny(missing_docs)]

//! # OpenAPI Import
//!
//! Maps an OpenAPI 3.0 document onto the canonical [`Api`].
//!
//! - `servers[0].url` -> `base_url` (path part only)
//! - any secured operation -> `auth_type = bearer`
//! - each `paths[path][method]` -> one [`Endpoint`]
//! - the lowest 2xx response -> `response`, other 4xx/5xx -> `errors`

use crate::document::{parse_value, read_source, Syntax};
use crate::error::{AppError, AppResult};
use crate::field::{schema_to_field_type, schema_to_fields, FieldDescriptor, FieldMap, FieldType};
use crate::importer::{validate_endpoints, Importer};
use crate::models::{
    Api, AuthType, Endpoint, EndpointRequest, EndpointResponse, ErrorResponse, DEFAULT_BASE_URL,
};
use crate::oas::shims::{preferred_media_type, ShimMediaType, ShimOpenApi, ShimOperation};
use crate::paths::base_path_from_server_url;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Importer for OpenAPI 3.0 JSON/YAML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiImporter;

impl Importer for OpenApiImporter {
    fn import(&self, path: &Path) -> AppResult<Api> {
        let syntax = Syntax::from_path(path)?;
        info!(file = ?path, ?syntax, "Importing OpenAPI document");
        let content = read_source(path)?;
        let api = parse_openapi(&content, syntax)?;
        info!(
            endpoints = api.endpoints.len(),
            base_url = %api.base_url,
            auth_type = %api.auth_type,
            "OpenAPI import complete"
        );
        Ok(api)
    }

    fn validate(&self, api: &Api) -> AppResult<()> {
        validate_endpoints(api)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".json", ".yaml", ".yml"]
    }
}

/// Parses OpenAPI `content` written in `syntax` into the canonical model.
pub fn parse_openapi(content: &str, syntax: Syntax) -> AppResult<Api> {
    openapi_from_value(parse_value(content, syntax)?)
}

/// Maps an already parsed JSON tree onto the canonical model.
pub fn openapi_from_value(value: Value) -> AppResult<Api> {
    let document: ShimOpenApi = serde_json::from_value(value)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;
    Ok(convert_document(&document))
}

fn convert_document(document: &ShimOpenApi) -> Api {
    let base_url = document
        .servers
        .first()
        .map(|server| base_path_from_server_url(&server.url))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut endpoints = Vec::new();
    for (path, item) in &document.paths {
        for (method, operation) in &item.operations {
            endpoints.push(convert_operation(path, method, operation));
        }
    }

    Api {
        base_url,
        auth_type: determine_auth_type(document),
        endpoints,
    }
}

/// Any secured operation classifies the whole API as bearer.
fn determine_auth_type(document: &ShimOpenApi) -> AuthType {
    let secured = document
        .paths
        .values()
        .flat_map(|item| item.operations.values())
        .any(ShimOperation::is_secured);
    if secured {
        AuthType::Bearer
    } else {
        AuthType::None
    }
}

fn convert_operation(path: &str, method: &str, operation: &ShimOperation) -> Endpoint {
    let mut endpoint = Endpoint::new(method, path);
    endpoint.auth = operation.is_secured();
    endpoint.description = operation
        .summary
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| operation.description.clone())
        .unwrap_or_default();

    if operation.request_body.is_some() || !operation.parameters.is_empty() {
        endpoint.request = Some(convert_request(operation));
    }

    let mut statuses: Vec<(u16, &str)> = operation
        .responses
        .keys()
        .map(|key| (parse_status_code(key), key.as_str()))
        .collect();
    statuses.sort_by_key(|(status, _)| *status);

    if let Some((status, key)) = statuses.iter().find(|(_, key)| key.starts_with('2')) {
        let body = operation
            .responses
            .get(*key)
            .map(|response| media_fields(&response.content))
            .unwrap_or_default();
        endpoint.response = Some(EndpointResponse {
            status: *status,
            body,
        });
    }

    endpoint.errors = statuses
        .iter()
        .filter(|(_, key)| key.starts_with('4') || key.starts_with('5'))
        .filter_map(|(status, key)| {
            let response = operation.responses.get(*key)?;
            Some(ErrorResponse {
                status: *status,
                code: format!("HTTP_{}", status),
                message: response.description.clone(),
            })
        })
        .collect();

    endpoint
}

fn convert_request(operation: &ShimOperation) -> EndpointRequest {
    let mut request = EndpointRequest::default();

    for param in &operation.parameters {
        if param.name.is_empty() {
            debug!("Skipping unnamed (referenced) parameter");
            continue;
        }
        let ty = param
            .schema
            .as_ref()
            .map(schema_to_field_type)
            .unwrap_or(FieldType::String);
        let descriptor = FieldDescriptor::new(ty, param.required);

        match param.location.as_str() {
            "path" => {
                request.params.insert(param.name.clone(), descriptor);
            }
            "query" => {
                request.query.insert(param.name.clone(), descriptor);
            }
            other => debug!(name = %param.name, location = %other, "Ignoring parameter"),
        }
    }

    if let Some(body) = &operation.request_body {
        request.body = media_fields(&body.content);
    }
    request
}

fn media_fields(content: &IndexMap<String, ShimMediaType>) -> FieldMap {
    preferred_media_type(content)
        .and_then(|media| media.schema.as_ref())
        .map(schema_to_fields)
        .unwrap_or_default()
}

/// Numeric status. Range keys such as `4XX` map to the class base (400);
/// anything else falls back to 200.
fn parse_status_code(key: &str) -> u16 {
    if let Ok(status) = key.parse::<u16>() {
        return status;
    }
    let status = match key.chars().next().and_then(|c| c.to_digit(10)) {
        Some(class @ 1..=5) => class as u16 * 100,
        _ => 200,
    };
    debug!(key = %key, status, "Non-numeric status code");
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USERS_YAML: &str = r#"
openapi: 3.0.0
info:
  title: Users
  version: 1.0.0
servers:
  - url: https://api.example.com/api/v2
paths:
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
    get:
      summary: Get a user
      security:
        - bearerAuth: []
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
            format: uuid
        - name: expand
          in: query
          schema:
            type: boolean
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: object
                required: [id, name]
                properties:
                  id:
                    type: string
                  name:
                    type: string
        '404':
          description: User not found
  /health:
    get:
      description: Liveness probe
      responses:
        200:
          description: OK
"#;

    #[test]
    fn test_parse_users_document() {
        let api = parse_openapi(USERS_YAML, Syntax::Yaml).unwrap();
        assert_eq!(api.base_url, "/api/v2");
        assert_eq!(api.auth_type, AuthType::Bearer);
        assert_eq!(api.endpoints.len(), 2);

        let get = &api.endpoints[0];
        assert_eq!(get.method, "GET");
        assert_eq!(get.path, "/users/{id}");
        assert_eq!(get.description, "Get a user");
        assert!(get.auth);

        let request = get.request.as_ref().unwrap();
        assert_eq!(request.params["id"], FieldDescriptor::required(FieldType::Uuid));
        assert_eq!(
            request.query["expand"],
            FieldDescriptor::optional(FieldType::Boolean)
        );

        let response = get.response.as_ref().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["id"].to_string(), "string, required");
        assert_eq!(response.body["name"].to_string(), "string, required");

        assert_eq!(get.errors.len(), 1);
        assert_eq!(get.errors[0].status, 404);
        assert_eq!(get.errors[0].message, "User not found");

        let health = &api.endpoints[1];
        assert_eq!(health.description, "Liveness probe");
        assert!(!health.auth);
        assert!(health.request.is_none());
        assert_eq!(health.response.as_ref().unwrap().status, 200);
    }

    #[test]
    fn test_lowest_success_response_wins() {
        let json = r#"{
            "openapi": "3.0.0",
            "paths": {"/items": {"post": {"responses": {
                "202": {"description": "Accepted"},
                "201": {"description": "Created", "content": {"application/json": {"schema": {
                    "type": "object", "properties": {"id": {"type": "integer"}}}}}}
            }}}}
        }"#;
        let api = parse_openapi(json, Syntax::Json).unwrap();
        let response = api.endpoints[0].response.as_ref().unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body["id"], FieldDescriptor::optional(FieldType::Integer));
    }

    #[test]
    fn test_range_status_keys() {
        let json = r#"{
            "openapi": "3.0.0",
            "paths": {"/a": {"get": {"responses": {
                "200": {"description": "OK"},
                "4XX": {"description": "Client error"},
                "5XX": {"description": "Server error"}
            }}}}
        }"#;
        let api = parse_openapi(json, Syntax::Json).unwrap();
        let endpoint = &api.endpoints[0];
        assert_eq!(endpoint.response.as_ref().unwrap().status, 200);

        let errors: Vec<(u16, &str)> = endpoint
            .errors
            .iter()
            .map(|e| (e.status, e.code.as_str()))
            .collect();
        assert_eq!(errors, vec![(400, "HTTP_400"), (500, "HTTP_500")]);
        assert_eq!(parse_status_code("2XX"), 200);
        assert_eq!(parse_status_code("default"), 200);
    }

    #[test]
    fn test_server_defaults() {
        let api = parse_openapi("openapi: 3.0.0\npaths: {}\n", Syntax::Yaml).unwrap();
        assert_eq!(api.base_url, "/api/v1");
        assert_eq!(api.auth_type, AuthType::None);

        let api = parse_openapi(
            "openapi: 3.0.0\nservers:\n  - url: https://api.example.com\npaths: {}\n",
            Syntax::Yaml,
        )
        .unwrap();
        assert_eq!(api.base_url, "/api/v1");

        let api = parse_openapi(
            "openapi: 3.0.0\nservers:\n  - url: v3\npaths: {}\n",
            Syntax::Yaml,
        )
        .unwrap();
        assert_eq!(api.base_url, "/v3");
    }

    #[test]
    fn test_request_body_prefers_json() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /upload:
    post:
      requestBody:
        content:
          text/plain:
            schema:
              type: object
              properties:
                ignored: {type: string}
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name: {type: string, format: email}
                created: {type: string, format: date-time}
      responses:
        '201': {description: Created}
"#;
        let api = parse_openapi(yaml, Syntax::Yaml).unwrap();
        let body = &api.endpoints[0].request.as_ref().unwrap().body;
        assert_eq!(body.len(), 2);
        assert_eq!(body["name"], FieldDescriptor::required(FieldType::String));
        assert_eq!(body["created"], FieldDescriptor::optional(FieldType::DateTime));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            parse_openapi("{ broken", Syntax::Json),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_openapi("paths: [1, 2]", Syntax::Yaml),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_import_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.txt");
        std::fs::write(&path, "openapi: 3.0.0").unwrap();
        assert!(matches!(
            OpenApiImporter.import(&path),
            Err(AppError::UnsupportedExtension(_))
        ));
    }
}
