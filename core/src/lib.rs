#![deny(missing_docs)]

//! # Architect Core
//!
//! Format conversion between the native API model (`api.yaml`), OpenAPI 3.0
//! and Postman Collection v2.1, plus the merge and persistence logic used by
//! the `architect` CLI.

/// Shared error types.
pub mod error;

/// Canonical API model.
pub mod models;

/// Field descriptors and JSON-schema type mapping.
pub mod field;

/// URL and path analysis.
pub mod paths;

/// Type inference from sample JSON values.
pub mod inference;

/// Reading and syntax-level parsing of source documents.
pub mod document;

/// Importer contract, factory and format detection.
pub mod importer;

/// OpenAPI 3.0 import and export.
pub mod oas;

/// Postman Collection v2.1 import and export.
pub mod postman;

/// Native `api.yaml` encoding.
pub mod native;

/// Markdown export.
pub mod markdown;

/// Export format selection.
pub mod exporter;

/// Merge of existing and imported models.
pub mod merge;

/// Specification directory persistence.
pub mod store;

/// Generated `project.md` content.
pub mod summary;

pub use error::{AppError, AppResult};
pub use exporter::ExportFormat;
pub use field::{FieldDescriptor, FieldMap, FieldType};
pub use importer::{create_importer, detect_format, ImportFormat, Importer};
pub use markdown::to_markdown;
pub use merge::merge;
pub use models::{
    Api, AuthType, Endpoint, EndpointRequest, EndpointResponse, ErrorResponse, DEFAULT_BASE_URL,
};
pub use native::NativeImporter;
pub use oas::{to_openapi, OpenApiImporter};
pub use postman::{to_collection, PostmanImporter};
pub use store::SpecStore;
pub use summary::project_markdown;
