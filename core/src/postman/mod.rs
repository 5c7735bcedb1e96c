#![deny(missing_docs)]

//! # Postman Conversion Module
//!
//! - **shims**: serde structures for Postman Collection v2.1.
//! - **import**: collection -> canonical model.
//! - **export**: canonical model -> collection.

pub mod export;
pub mod import;
pub mod shims;

pub use export::to_collection;
pub use import::{collection_to_api, parse_collection, PostmanImporter};
