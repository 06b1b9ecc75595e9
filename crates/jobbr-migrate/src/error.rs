//! Error types for the migrator.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code when pre-flight validation aborted the run.
pub const EXIT_VALIDATION_FAILED: u8 = 2;
/// Exit code when the apply step failed.
pub const EXIT_APPLY_FAILED: u8 = 3;
/// Exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for migrator operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not open a session against the database
    #[error("{0}")]
    Connection(String),

    /// Error reported by the SQL Server driver
    #[error("Source database error: {0}")]
    Source(#[from] tiberius::error::Error),

    /// Connection attempt exceeded the configured timeout
    #[error("Timed out after {0}s while connecting")]
    Timeout(u64),

    /// Catalog did not contain the expected tables
    #[error("Schema {schema} does not contain the expected tables (found {found})")]
    SchemaMismatch { schema: String, found: usize },

    /// Directory does not exist
    #[error("Directory not found: {0}")]
    DirectoryMissing(PathBuf),

    /// Path could not be made absolute
    #[error("Cannot resolve path '{path}': {message}")]
    PathResolution { path: String, message: String },

    /// Pre-flight validation aborted the run
    #[error("Validation failed")]
    Validation,

    /// Apply step failed
    #[error("Apply failed: {0}")]
    Apply(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MigrateError {
    /// Create a PathResolution error
    pub fn path_resolution(path: impl Into<String>, message: impl ToString) -> Self {
        MigrateError::PathResolution {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Detail text shown next to a failed check.
    pub fn check_detail(&self) -> String {
        match self {
            MigrateError::SchemaMismatch { .. } => "Missing!".to_string(),
            MigrateError::DirectoryMissing(_) => "Not found.".to_string(),
            MigrateError::Source(e) => format!("Failed. {}", e),
            other => format!("Failed. {}", other),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrateError::Io(_) => EXIT_IO_ERROR,
            MigrateError::Validation
            | MigrateError::Connection(_)
            | MigrateError::Source(_)
            | MigrateError::Timeout(_)
            | MigrateError::SchemaMismatch { .. }
            | MigrateError::DirectoryMissing(_)
            | MigrateError::PathResolution { .. } => EXIT_VALIDATION_FAILED,
            MigrateError::Apply(_) => EXIT_APPLY_FAILED,
            MigrateError::Config(_) | MigrateError::Yaml(_) => EXIT_CONFIG_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for migrator operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_detail_for_known_failures() {
        let err = MigrateError::SchemaMismatch {
            schema: "Jobbr".into(),
            found: 2,
        };
        assert_eq!(err.check_detail(), "Missing!");

        let err = MigrateError::DirectoryMissing(PathBuf::from("/nope"));
        assert_eq!(err.check_detail(), "Not found.");

        let err = MigrateError::Connection("Login failed for user 'sa'.".into());
        assert_eq!(err.check_detail(), "Failed. Login failed for user 'sa'.");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MigrateError::Config("x".into()).exit_code(), EXIT_CONFIG_ERROR);
        assert_eq!(MigrateError::Validation.exit_code(), EXIT_VALIDATION_FAILED);
        assert_eq!(MigrateError::Apply("x".into()).exit_code(), EXIT_APPLY_FAILED);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(MigrateError::Io(io).exit_code(), EXIT_IO_ERROR);
    }

    #[test]
    fn test_format_detailed_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.yaml");
        let err = MigrateError::Io(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error: config.yaml"));
    }

    #[test]
    fn test_driver_error_is_labelled_once() {
        let err = MigrateError::from(tiberius::error::Error::Protocol("bad packet".into()));
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: Source database error: Protocol error: bad packet\n"));
        assert!(detailed.contains("Caused by:\n  1: Protocol error: bad packet"));
        assert_eq!(err.check_detail(), "Failed. Protocol error: bad packet");
    }
}
