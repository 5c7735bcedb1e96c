//! # Project Summary
//!
//! The `project.md` written next to a freshly imported `api.yaml`.

use crate::models::{Api, AuthType};
use std::collections::BTreeMap;

/// Renders a basic project description for an imported API.
pub fn project_markdown(api: &Api) -> String {
    format!(
        "# Imported API Project

## Overview
This project was imported from an external API specification.

## Tech Stack
- Backend: Other
- Database: Other
- Auth: {auth}

## Business Logic

### Endpoints Overview
This API contains {count} endpoints with base URL: {base_url}

{summary}

## Authentication
{auth_description}
",
        auth = auth_label(api.auth_type),
        count = api.endpoints.len(),
        base_url = api.base_url,
        summary = endpoint_summary(api),
        auth_description = auth_description(api.auth_type),
    )
}

fn auth_label(auth_type: AuthType) -> &'static str {
    match auth_type {
        AuthType::None => "None",
        AuthType::Bearer => "Bearer",
        AuthType::Basic => "Basic",
        AuthType::ApiKey => "Apikey",
    }
}

fn auth_description(auth_type: AuthType) -> &'static str {
    match auth_type {
        AuthType::None => "No authentication required for this API.",
        AuthType::Bearer => "Bearer token authentication required.",
        AuthType::Basic => "Basic authentication required.",
        AuthType::ApiKey => "API key authentication required.",
    }
}

/// Endpoint counts grouped by method, methods in sorted order.
fn endpoint_summary(api: &Api) -> String {
    if api.endpoints.is_empty() {
        return "No endpoints defined yet.".to_string();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for endpoint in &api.endpoints {
        *counts.entry(endpoint.method.as_str()).or_default() += 1;
    }

    let mut out = String::from("### Endpoint Summary\n");
    for (method, count) in counts {
        out.push_str(&format!("- **{}**: {} endpoints\n", method, count));
    }
    out
}
