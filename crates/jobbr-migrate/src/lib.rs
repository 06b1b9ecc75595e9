//! # jobbr-migrate
//!
//! Pre-flight validation for the Jobbr database and artefact migration.
//!
//! Before anything is changed, the migrator checks that:
//!
//! - **the database is reachable** with the given connection string
//! - **the Jobbr schema** holds the expected tables
//! - **the artefact and run directories** exist
//!
//! Checks run in that order and stop at the first failure. When all of them
//! pass, a configuration summary sized to the terminal is printed and the
//! apply step may run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jobbr_migrate::{Config, Console, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> jobbr_migrate::Result<()> {
//!     let config = Config::load("jobbr-migrate.yaml")?;
//!     let orchestrator = Orchestrator::new(&config);
//!     let mut console = Console::stdout();
//!     let abort = orchestrator.validate(&config, &mut console).await;
//!     println!("valid: {}", !abort);
//!     Ok(())
//! }
//! ```

pub mod apply;
pub mod catalog;
pub mod checks;
pub mod config;
pub mod display;
pub mod error;
pub mod orchestrator;

// Re-exports for convenient access
pub use apply::{MigrationApplier, NoOpApplier};
pub use catalog::{CatalogClient, ConnectionInfo, MssqlCatalog, QualifiedTableName};
pub use checks::{ValidationResult, ValidationStatus};
pub use config::{Config, ValidationConfig};
pub use display::{shorten_path, Console};
pub use error::{MigrateError, Result};
pub use orchestrator::{Orchestrator, RunOutcome};
