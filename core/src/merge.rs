//! # Merge Engine
//!
//! Combines a persisted API with a freshly imported one. Imported values win
//! except where they are the literal defaults.

use crate::models::{Api, AuthType, Endpoint, DEFAULT_BASE_URL};
use indexmap::IndexMap;
use tracing::debug;

/// Merges `imported` into `existing`, returning a new value.
///
/// - `base_url`: imported when non-empty and not `/api/v1`.
/// - `auth_type`: imported when not `none`.
/// - endpoints keyed by `METHOD:path`; imported entries replace existing ones
///   in place, new ones are appended in import order.
pub fn merge(existing: &Api, imported: &Api) -> Api {
    let base_url = if !imported.base_url.is_empty() && imported.base_url != DEFAULT_BASE_URL {
        imported.base_url.clone()
    } else {
        existing.base_url.clone()
    };

    let auth_type = if imported.auth_type != AuthType::None {
        imported.auth_type
    } else {
        existing.auth_type
    };

    let mut endpoints: IndexMap<String, Endpoint> = existing
        .endpoints
        .iter()
        .map(|endpoint| (endpoint.key(), endpoint.clone()))
        .collect();

    let mut replaced = 0usize;
    for endpoint in &imported.endpoints {
        if endpoints.insert(endpoint.key(), endpoint.clone()).is_some() {
            replaced += 1;
        }
    }
    debug!(
        existing = existing.endpoints.len(),
        imported = imported.endpoints.len(),
        replaced,
        "Merged endpoints"
    );

    Api {
        base_url,
        auth_type,
        endpoints: endpoints.into_values().collect(),
    }
}
