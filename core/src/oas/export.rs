//! # OpenAPI Export
//!
//! Renders the canonical model as an OpenAPI 3.0 JSON document.

use crate::field::{fields_to_schema, FieldMap};
use crate::models::{Api, AuthType, Endpoint};
use crate::oas::shims::{
    ShimComponents, ShimInfo, ShimMediaType, ShimOpenApi, ShimOperation, ShimParameter,
    ShimPathItem, ShimRequestBody, ShimResponse, ShimSecurityScheme, ShimServer,
};
use indexmap::IndexMap;
use serde_json::json;
use tracing::warn;

const JSON_MEDIA_TYPE: &str = "application/json";
const BEARER_SCHEME_NAME: &str = "bearerAuth";

/// Renders `api` as pretty-printed OpenAPI 3.0 JSON.
pub fn to_openapi(api: &Api) -> String {
    let document = build_document(api);
    match serde_json::to_string_pretty(&document) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize OpenAPI document");
            String::new()
        }
    }
}

/// Builds the document tree without serializing it.
pub fn build_document(api: &Api) -> ShimOpenApi {
    let mut paths: IndexMap<String, ShimPathItem> = IndexMap::new();
    for endpoint in &api.endpoints {
        paths
            .entry(endpoint.path.clone())
            .or_default()
            .operations
            .insert(endpoint.method.to_ascii_lowercase(), build_operation(endpoint));
    }

    let components = (api.auth_type == AuthType::Bearer).then(|| {
        let mut security_schemes = IndexMap::new();
        security_schemes.insert(
            BEARER_SCHEME_NAME.to_string(),
            ShimSecurityScheme {
                kind: Some("http".into()),
                scheme: Some("bearer".into()),
                bearer_format: Some("JWT".into()),
            },
        );
        ShimComponents { security_schemes }
    });

    ShimOpenApi {
        openapi: "3.0.0".into(),
        info: ShimInfo {
            title: "API Documentation".into(),
            description: None,
            version: "1.0.0".into(),
        },
        servers: vec![ShimServer {
            url: api.base_url.clone(),
            description: None,
        }],
        paths,
        components,
    }
}

fn build_operation(endpoint: &Endpoint) -> ShimOperation {
    let security = if endpoint.auth {
        vec![json!({ "bearerAuth": [] })]
    } else {
        Vec::new()
    };

    let mut operation = ShimOperation {
        summary: Some(endpoint.description.clone()),
        security: Some(security),
        responses: build_responses(endpoint),
        ..Default::default()
    };

    if let Some(request) = &endpoint.request {
        operation.parameters = build_parameters("path", &request.params)
            .chain(build_parameters("query", &request.query))
            .collect();

        if !request.body.is_empty() {
            operation.request_body = Some(ShimRequestBody {
                description: None,
                content: json_content(&request.body),
                required: true,
            });
        }
    }

    operation
}

fn build_parameters<'a>(
    location: &'static str,
    fields: &'a FieldMap,
) -> impl Iterator<Item = ShimParameter> + 'a {
    fields.iter().map(move |(name, descriptor)| ShimParameter {
        name: name.clone(),
        location: location.to_string(),
        description: None,
        required: descriptor.required,
        schema: Some(json!({ "type": descriptor.ty.json_schema_type() })),
    })
}

fn build_responses(endpoint: &Endpoint) -> IndexMap<String, ShimResponse> {
    let mut responses = IndexMap::new();

    if let Some(response) = &endpoint.response {
        let content = if response.body.is_empty() {
            IndexMap::new()
        } else {
            json_content(&response.body)
        };
        responses.insert(
            response.status.to_string(),
            ShimResponse {
                description: "Success".into(),
                content,
            },
        );
    }

    for error in &endpoint.errors {
        responses.insert(
            error.status.to_string(),
            ShimResponse {
                description: error.message.clone(),
                content: IndexMap::new(),
            },
        );
    }

    responses
}

fn json_content(fields: &FieldMap) -> IndexMap<String, ShimMediaType> {
    let mut content = IndexMap::new();
    content.insert(
        JSON_MEDIA_TYPE.to_string(),
        ShimMediaType {
            schema: Some(fields_to_schema(fields)),
        },
    );
    content
}
