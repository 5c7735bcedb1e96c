//! # Markdown Export
//!
//! Human-readable API reference, one section per endpoint.

use crate::field::FieldMap;
use crate::models::{Api, AuthType};
use std::fmt::Write;

/// Renders `api` as Markdown documentation.
pub fn to_markdown(api: &Api) -> String {
    let mut out = String::new();
    render(&mut out, api).expect("Writing to a String is infallible");
    out
}

fn render(out: &mut String, api: &Api) -> std::fmt::Result {
    writeln!(out, "# API Documentation\n")?;
    writeln!(out, "Base URL: `{}`\n", api.base_url)?;

    if api.auth_type != AuthType::None {
        writeln!(out, "## Authentication")?;
        writeln!(out, "This API uses {} authentication.\n", api.auth_type)?;
    }

    writeln!(out, "## Endpoints\n")?;

    for endpoint in &api.endpoints {
        writeln!(out, "### {} {}", endpoint.method, endpoint.path)?;
        writeln!(out, "{}\n", endpoint.description)?;

        if endpoint.auth {
            writeln!(out, "**Authentication Required**\n")?;
        }

        if let Some(request) = endpoint.request.as_ref().filter(|r| !r.body.is_empty()) {
            writeln!(out, "**Request Body:**")?;
            write_fields(out, &request.body)?;
        }

        if let Some(response) = endpoint.response.as_ref().filter(|r| !r.body.is_empty()) {
            writeln!(out, "**Response ({}):**", response.status)?;
            write_fields(out, &response.body)?;
        }

        if !endpoint.errors.is_empty() {
            writeln!(out, "**Errors:**")?;
            for error in &endpoint.errors {
                writeln!(out, "- {} {}: {}", error.status, error.code, error.message)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "---\n")?;
    }
    Ok(())
}

/// Pseudo-JSON listing of `name: "descriptor"` pairs.
fn write_fields(out: &mut String, fields: &FieldMap) -> std::fmt::Result {
    writeln!(out, "```json\n{{")?;
    for (name, descriptor) in fields {
        writeln!(out, "  \"{}\": \"{}\",", name, descriptor)?;
    }
    writeln!(out, "}}\n```\n")
}
