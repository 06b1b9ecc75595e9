//! Pre-flight checks.
//!
//! Every check converts its own failures into a [`ValidationResult`]; nothing
//! escapes a checker as an error.

mod connectivity;
mod directory;
mod schema;

pub use connectivity::ConnectivityChecker;
pub use directory::DirectoryChecker;
pub use schema::{SchemaChecker, SchemaExpectation};

use crate::error::MigrateError;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Passed,
    Failed,
}

/// Status plus the detail text printed after the check label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub detail: String,
}

impl ValidationResult {
    pub fn passed(detail: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Passed,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Failed,
            detail: detail.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ValidationStatus::Passed
    }
}

impl From<MigrateError> for ValidationResult {
    fn from(err: MigrateError) -> Self {
        ValidationResult::failed(err.check_detail())
    }
}
