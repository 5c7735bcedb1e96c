//! # Native Format
//!
//! The `api.yaml` encoding of the canonical model. Reading it is the identity
//! import; writing it is how every import is persisted.

use crate::document::read_source;
use crate::error::{AppError, AppResult};
use crate::importer::Importer;
use crate::models::Api;
use std::path::Path;
use tracing::info;

/// Parses native YAML text. Malformed field descriptors are rejected here.
pub fn from_yaml(content: &str) -> AppResult<Api> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse API YAML: {}", e)))
}

/// Serializes `api` as native YAML.
pub fn to_yaml(api: &Api) -> AppResult<String> {
    serde_yaml::to_string(api)
        .map_err(|e| AppError::General(format!("Failed to serialize API YAML: {}", e)))
}

/// Importer for files already in the native format.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeImporter;

impl Importer for NativeImporter {
    fn import(&self, path: &Path) -> AppResult<Api> {
        info!(file = ?path, "Importing native API file");
        from_yaml(&read_source(path)?)
    }

    /// Only the base URL is checked; endpoints pass through untouched.
    fn validate(&self, api: &Api) -> AppResult<()> {
        if api.base_url.is_empty() {
            return Err(AppError::Validation("base URL is required".into()));
        }
        Ok(())
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".yaml", ".yml"]
    }
}
