#![deny(missing_docs)]

//! # OpenAPI Conversion Module
//!
//! - **shims**: serde structures for the document subset that is read/written.
//! - **import**: OpenAPI 3.0 (JSON/YAML) -> canonical model.
//! - **export**: canonical model -> OpenAPI 3.0 JSON.

pub mod export;
pub mod import;
pub mod shims;

pub use export::to_openapi;
pub use import::{openapi_from_value, parse_openapi, OpenApiImporter};
