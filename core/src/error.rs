//! # Error Handling
//!
//! Provides the unified `AppError` enum used by every importer, exporter and
//! the persistence layer.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: only `std::io::Error` and `String` convert implicitly; every other
/// variant is built explicitly where the failure is detected.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A file could not be read.
    #[from(ignore)]
    #[display("Failed to read file {path}: {source}")]
    ReadFile {
        /// Path of the file.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// A file could not be written.
    #[from(ignore)]
    #[display("Failed to write file {path}: {source}")]
    WriteFile {
        /// Path of the file.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// Malformed JSON or YAML. Carries the parser message.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Unknown format tag (e.g. `--format soap`).
    #[from(ignore)]
    #[display("Unsupported format: {_0}")]
    UnsupportedFormat(String),

    /// File extension that no importer or detector accepts.
    #[from(ignore)]
    #[display("Unsupported file extension: {_0}")]
    UnsupportedExtension(String),

    /// Postman document without the `info.schema` marker.
    #[from(ignore)]
    #[display("Invalid Postman collection: {_0}")]
    InvalidCollection(String),

    /// Imported API failed structural checks.
    #[from(ignore)]
    #[display("Validation Error: {_0}")]
    Validation(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Builds a `ReadFile` error for `path`.
    pub fn read_file(path: &std::path::Path, source: std::io::Error) -> Self {
        AppError::ReadFile {
            path: path.display().to_string(),
            source,
        }
    }

    /// Builds a `WriteFile` error for `path`.
    pub fn write_file(path: &std::path::Path, source: std::io::Error) -> Self {
        AppError::WriteFile {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Manual implementation of the standard Error trait.
///
/// Only the IO-backed variants expose a `source`; the string variants already
/// carry the full message.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::ReadFile { source, .. } | AppError::WriteFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};
    use std::path::Path;

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_read_file_keeps_cause() {
        let err = AppError::read_file(
            Path::new("missing.json"),
            Error::new(ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to read file missing.json: no such file"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_display() {
        let err = AppError::Validation("endpoint 2: path is required".into());
        assert_eq!(
            format!("{}", err),
            "Validation Error: endpoint 2: path is required"
        );
        assert!(err.source().is_none());
    }
}
