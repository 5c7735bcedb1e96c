//! # Exporters
//!
//! Target formats for `architect export`. Exporting never fails: every
//! in-memory field descriptor is well-formed.

use crate::error::{AppError, AppResult};
use crate::markdown::to_markdown;
use crate::models::Api;
use crate::oas::to_openapi;
use crate::postman::to_collection;
use std::fmt;
use std::str::FromStr;

/// Export target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// OpenAPI 3.0 JSON.
    #[default]
    OpenApi,
    /// Markdown reference.
    Markdown,
    /// Postman Collection v2.1.
    Postman,
}

impl ExportFormat {
    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::OpenApi => "openapi",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Postman => "postman",
        }
    }

    /// Output file used when no path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::OpenApi => "openapi.json",
            ExportFormat::Markdown => "API_DOCUMENTATION.md",
            ExportFormat::Postman => "postman_collection.json",
        }
    }

    /// Renders `api` in this format.
    pub fn export(&self, api: &Api) -> String {
        match self {
            ExportFormat::OpenApi => to_openapi(api),
            ExportFormat::Markdown => to_markdown(api),
            ExportFormat::Postman => to_collection(api),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "openapi" => Ok(ExportFormat::OpenApi),
            "markdown" => Ok(ExportFormat::Markdown),
            "postman" => Ok(ExportFormat::Postman),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }
}
