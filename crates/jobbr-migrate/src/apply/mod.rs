//! Apply step that runs after a successful pre-flight.
//!
//! The [`MigrationApplier`] trait decouples the orchestrator from whatever
//! performs the actual database and folder changes. The orchestrator only calls
//! it when every check passed and `apply` is set in the configuration.

mod noop;

pub use noop::NoOpApplier;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;

/// Performs the migration once validation has passed.
///
/// # Example
///
/// ```rust,ignore
/// let applier = NoOpApplier::new();
/// applier.apply(&config).await?;
/// ```
#[async_trait]
pub trait MigrationApplier: Send + Sync {
    /// Apply changes to the database and folders described by `config`.
    async fn apply(&self, config: &Config) -> Result<()>;

    /// Short name for logging.
    fn applier_type(&self) -> &'static str;
}
