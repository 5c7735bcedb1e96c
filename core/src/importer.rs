#![deny(missing_docs)]

//! # Importers
//!
//! The uniform import contract, the factory that selects an implementation
//! from a format tag, and the detector that guesses the tag from a file.

use crate::document::{extension_of, read_source};
use crate::error::{AppError, AppResult};
use crate::models::Api;
use crate::native::NativeImporter;
use crate::oas::OpenApiImporter;
use crate::postman::PostmanImporter;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Converts a foreign document into the canonical [`Api`].
///
/// Implementations are stateless; `import` either returns a complete model or
/// an error, never a partially filled one.
pub trait Importer {
    /// Parses the file at `path`.
    fn import(&self, path: &Path) -> AppResult<Api>;

    /// Structural checks run by the caller right after `import`.
    fn validate(&self, api: &Api) -> AppResult<()>;

    /// File extensions (with leading dot) this importer reads.
    fn supported_extensions(&self) -> &'static [&'static str];
}

/// Source formats understood by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// OpenAPI 3.0, JSON or YAML.
    OpenApi,
    /// Postman Collection v2.1.
    Postman,
    /// The native `api.yaml` encoding.
    Native,
}

impl ImportFormat {
    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFormat::OpenApi => "openapi",
            ImportFormat::Postman => "postman",
            ImportFormat::Native => "architect",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "openapi" | "swagger" | "json" | "yaml" | "yml" => Ok(ImportFormat::OpenApi),
            "postman" => Ok(ImportFormat::Postman),
            "architect" | "native" => Ok(ImportFormat::Native),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Returns the importer for `format`.
pub fn create_importer(format: ImportFormat) -> Box<dyn Importer> {
    match format {
        ImportFormat::OpenApi => Box::new(OpenApiImporter),
        ImportFormat::Postman => Box::new(PostmanImporter),
        ImportFormat::Native => Box::new(NativeImporter),
    }
}

/// Guesses the format of `path`.
///
/// - `.yaml` / `.yml` are always OpenAPI; native files must be forced.
/// - `.json` is OpenAPI when the text mentions `openapi` or `swagger`,
///   Postman when it mentions `postman` or `collection`, OpenAPI otherwise.
/// - Anything else is an `UnsupportedExtension` error.
pub fn detect_format(path: &Path) -> AppResult<ImportFormat> {
    let ext = extension_of(path);
    let format = match ext.as_str() {
        ".yaml" | ".yml" => ImportFormat::OpenApi,
        ".json" => {
            let content = read_source(path)?;
            if content.contains("openapi") || content.contains("swagger") {
                ImportFormat::OpenApi
            } else if content.contains("postman") || content.contains("collection") {
                ImportFormat::Postman
            } else {
                ImportFormat::OpenApi
            }
        }
        _ => return Err(AppError::UnsupportedExtension(ext)),
    };
    debug!(file = ?path, %format, "Detected import format");
    Ok(format)
}

/// Shared checks for importers that produce endpoints: a base URL, and a path
/// and method on every endpoint. Errors name the offending endpoint index.
pub fn validate_endpoints(api: &Api) -> AppResult<()> {
    if api.base_url.is_empty() {
        return Err(AppError::Validation("base URL is required".into()));
    }

    for (idx, endpoint) in api.endpoints.iter().enumerate() {
        if endpoint.path.is_empty() {
            return Err(AppError::Validation(format!(
                "endpoint {}: path is required",
                idx
            )));
        }
        if endpoint.method.is_empty() {
            return Err(AppError::Validation(format!(
                "endpoint {}: method is required",
                idx
            )));
        }
    }
    Ok(())
}
