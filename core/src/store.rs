//! # Spec Store
//!
//! Reads and writes the specification directory:
//!
//! ```text
//! <dir>/
//!   api.yaml     native API model
//!   project.md   free-form project description
//! ```

use crate::error::{AppError, AppResult};
use crate::models::Api;
use crate::native::{from_yaml, to_yaml};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the native API model.
pub const API_FILE: &str = "api.yaml";
/// File name of the project description.
pub const PROJECT_FILE: &str = "project.md";

/// Handle on a specification directory. Nothing is touched until a method
/// is called.
#[derive(Debug, Clone)]
pub struct SpecStore {
    dir: PathBuf,
}

impl SpecStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The specification directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `api.yaml`.
    pub fn api_path(&self) -> PathBuf {
        self.dir.join(API_FILE)
    }

    /// Path of `project.md`.
    pub fn project_path(&self) -> PathBuf {
        self.dir.join(PROJECT_FILE)
    }

    /// Whether `api.yaml` exists.
    pub fn has_api(&self) -> bool {
        self.api_path().is_file()
    }

    /// Whether `project.md` exists.
    pub fn has_project(&self) -> bool {
        self.project_path().is_file()
    }

    /// Loads `api.yaml`.
    pub fn load_api(&self) -> AppResult<Api> {
        let path = self.api_path();
        let content = fs::read_to_string(&path).map_err(|e| AppError::read_file(&path, e))?;
        from_yaml(&content)
    }

    /// Loads `api.yaml`, or the empty baseline when it does not exist.
    pub fn load_or_default(&self) -> AppResult<Api> {
        if self.has_api() {
            self.load_api()
        } else {
            debug!(path = ?self.api_path(), "No existing API file, using empty baseline");
            Ok(Api::default())
        }
    }

    /// Writes `api.yaml`, creating the directory if needed.
    pub fn save_api(&self, api: &Api) -> AppResult<()> {
        let yaml = to_yaml(api)?;
        self.write(&self.api_path(), &yaml)?;
        info!(path = ?self.api_path(), endpoints = api.endpoints.len(), "Saved API specification");
        Ok(())
    }

    /// Reads `project.md`.
    pub fn read_project(&self) -> AppResult<String> {
        let path = self.project_path();
        fs::read_to_string(&path).map_err(|e| AppError::read_file(&path, e))
    }

    /// Writes `project.md`, creating the directory if needed.
    pub fn write_project(&self, content: &str) -> AppResult<()> {
        self.write(&self.project_path(), content)?;
        info!(path = ?self.project_path(), "Wrote project description");
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| AppError::write_file(&self.dir, e))?;
        fs::write(path, content).map_err(|e| AppError::write_file(path, e))
    }
}
