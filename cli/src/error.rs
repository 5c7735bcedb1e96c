#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate. Every failure names the stage it happened
//! in and wraps the library error that caused it.

use architect_core::AppError;
use derive_more::{Display, From};
use std::path::PathBuf;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// The input file does not exist.
    #[display("File not found: {}", _0.display())]
    #[from(ignore)]
    FileNotFound(PathBuf),

    /// `api.yaml` exists and neither `--merge` nor `--overwrite` was given.
    #[display(
        "{} already exists. Use --overwrite to replace or --merge to combine",
        _0.display()
    )]
    #[from(ignore)]
    FileExists(PathBuf),

    /// Format detection failed.
    #[display("Failed to detect format: {}", _0)]
    #[from(ignore)]
    Detect(AppError),

    /// The importer failed to parse the input.
    #[display("Failed to import: {}", _0)]
    #[from(ignore)]
    Import(AppError),

    /// The imported model failed validation.
    #[display("Imported API is invalid: {}", _0)]
    #[from(ignore)]
    Validate(AppError),

    /// The existing specification could not be read for merging.
    #[display("Failed to merge: {}", _0)]
    #[from(ignore)]
    Merge(AppError),

    /// Writing the specification failed.
    #[display("Failed to write API specification: {}", _0)]
    #[from(ignore)]
    Write(AppError),

    /// Reading the specification failed.
    #[display("Failed to load API specification: {}", _0)]
    #[from(ignore)]
    Load(AppError),

    /// Writing an export failed.
    #[display("Failed to export: {}", _0)]
    #[from(ignore)]
    Export(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),
}

/// Manual implementation of the standard Error trait.
///
/// Stage variants expose the wrapped library error as their source.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Detect(e)
            | CliError::Import(e)
            | CliError::Validate(e)
            | CliError::Merge(e)
            | CliError::Write(e)
            | CliError::Load(e)
            | CliError::Export(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
