//! # Command Context
//!
//! Settings shared by every command, resolved once from the global flags.

use architect_core::SpecStore;
use std::path::Path;

/// Caller-supplied configuration handed to each command.
#[derive(Debug, Clone)]
pub struct Context {
    /// The specification directory.
    pub store: SpecStore,
    /// Suppress human-oriented summaries.
    pub quiet: bool,
}

impl Context {
    /// Builds a context rooted at `dir`.
    pub fn new(dir: &Path, quiet: bool) -> Self {
        Self {
            store: SpecStore::new(dir),
            quiet,
        }
    }
}
