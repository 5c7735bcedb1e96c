//! # Postman Export
//!
//! Renders the canonical model as a minimal Postman Collection v2.1 that the
//! importer in this crate reads back.

use crate::models::{Api, Endpoint};
use crate::postman::shims::{
    ShimBody, ShimCollection, ShimHeader, ShimInfo, ShimItem, ShimRequest, ShimUrl,
    ShimUrlObject, COLLECTION_SCHEMA_V21,
};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Renders `api` as pretty-printed collection JSON.
pub fn to_collection(api: &Api) -> String {
    let collection = build_collection(api);
    match serde_json::to_string_pretty(&collection) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize Postman collection");
            String::new()
        }
    }
}

/// Builds the collection tree without serializing it.
pub fn build_collection(api: &Api) -> ShimCollection {
    ShimCollection {
        info: ShimInfo {
            postman_id: None,
            name: "API Collection".into(),
            description: None,
            schema: COLLECTION_SCHEMA_V21.into(),
        },
        item: api
            .endpoints
            .iter()
            .map(|endpoint| build_item(&api.base_url, endpoint))
            .collect(),
        auth: None,
        variable: Vec::new(),
    }
}

fn build_item(base_url: &str, endpoint: &Endpoint) -> ShimItem {
    let name = if endpoint.description.is_empty() {
        format!("{} {}", endpoint.method, endpoint.path)
    } else {
        endpoint.description.clone()
    };

    let mut header = Vec::new();
    if endpoint.auth {
        header.push(ShimHeader {
            key: "Authorization".into(),
            value: Some("Bearer {{token}}".into()),
            disabled: false,
        });
    }

    let body = endpoint
        .request
        .as_ref()
        .filter(|request| !request.body.is_empty())
        .map(|request| {
            let placeholders: Map<String, Value> = request
                .body
                .keys()
                .map(|field| (field.clone(), Value::String(String::new())))
                .collect();
            ShimBody {
                mode: "raw".into(),
                raw: Some(Value::Object(placeholders).to_string()),
                options: Some(json!({"raw": {"language": "json"}})),
                ..Default::default()
            }
        });

    ShimItem {
        name,
        request: Some(ShimRequest {
            method: endpoint.method.clone(),
            header,
            body,
            url: Some(ShimUrl::Detailed(ShimUrlObject {
                raw: Some(format!("{}{}", base_url, endpoint.path)),
                ..Default::default()
            })),
            auth: None,
            description: None,
        }),
        ..Default::default()
    }
}
