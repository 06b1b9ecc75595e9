//! Validation orchestrator - runs the pre-flight checks and the apply step.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::apply::{MigrationApplier, NoOpApplier};
use crate::catalog::{CatalogClient, MssqlCatalog};
use crate::checks::{
    ConnectivityChecker, DirectoryChecker, SchemaChecker, SchemaExpectation, ValidationResult,
};
use crate::config::Config;
use crate::display::{shorten_path, Console};
use crate::error::Result;

/// Columns taken by the summary labels.
const SUMMARY_LABEL_WIDTH: usize = 15;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A check failed; nothing was applied.
    Aborted,
    /// All checks passed; `apply` was not requested.
    Validated,
    /// All checks passed and the applier ran.
    Applied,
}

/// Sequences the pre-flight checks.
pub struct Orchestrator {
    catalog: Arc<dyn CatalogClient>,
    applier: Arc<dyn MigrationApplier>,
}

impl Orchestrator {
    /// Orchestrator against SQL Server with the no-op applier.
    pub fn new(config: &Config) -> Self {
        let timeout = config
            .validation
            .connect_timeout_secs
            .map(Duration::from_secs);
        Self::with_catalog(Arc::new(MssqlCatalog::new().with_connect_timeout(timeout)))
    }

    /// Orchestrator over any catalog client.
    pub fn with_catalog(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            catalog,
            applier: Arc::new(NoOpApplier::new()),
        }
    }

    /// Replace the apply step.
    pub fn with_applier(mut self, applier: Arc<dyn MigrationApplier>) -> Self {
        self.applier = applier;
        self
    }

    /// Run all checks in order, stopping at the first failure.
    ///
    /// Returns `true` when the run must abort and `false` when every check
    /// passed. On success the configuration summary is printed as well.
    pub async fn validate<W: Write>(&self, config: &Config, console: &mut Console<W>) -> bool {
        console.println("Validating Configuration");

        console.print(" - Database:   ");
        let result = ConnectivityChecker::new(&*self.catalog)
            .check(&config.database_connection)
            .await;
        if report(console, result) {
            return true;
        }

        console.print(" - Tables:      ");
        let expectation = SchemaExpectation::from(&config.validation);
        let result = SchemaChecker::new(&*self.catalog, expectation)
            .check(&config.database_connection, &config.schema)
            .await;
        if report(console, result) {
            return true;
        }

        let directories = DirectoryChecker::new();

        let label = "ArtefactDir: ";
        console.print(&format!(" - {}", label));
        if report(console, directories.check(label, &config.artefact_directory)) {
            return true;
        }

        let label = "RunDir:      ";
        console.print(&format!(" - {}", label));
        if report(console, directories.check(label, run_directory_target(config))) {
            return true;
        }

        info!("Pre-flight validation passed");
        print_configuration(config, console);
        false
    }

    /// Print the banner, validate, then apply when requested.
    pub async fn run<W: Write>(&self, config: &Config, console: &mut Console<W>) -> Result<RunOutcome> {
        console.println("Jobbr Migrator");
        console.println("==============");
        console.println("\n");

        if self.validate(config, console).await {
            warn!("Pre-flight validation failed, aborting");
            return Ok(RunOutcome::Aborted);
        }

        if !config.apply {
            info!("Apply not requested, leaving database and folders unchanged");
            return Ok(RunOutcome::Validated);
        }

        info!("Applying changes with {} applier", self.applier.applier_type());
        self.applier.apply(config).await?;
        Ok(RunOutcome::Applied)
    }
}

/// Print the detail line; returns `true` if the check failed.
fn report<W: Write>(console: &mut Console<W>, result: ValidationResult) -> bool {
    console.println(&result.detail);
    !result.is_passed()
}

/// Directory checked under the `RunDir` label.
///
/// Historically this is the artefact directory; the run directory is only used
/// when `check_run_directory` is set and one is configured.
fn run_directory_target(config: &Config) -> &str {
    match config.run_directory() {
        Some(dir) if config.validation.check_run_directory => dir,
        _ => &config.artefact_directory,
    }
}

/// Print the configuration summary bounded by the console width.
pub fn print_configuration<W: Write>(config: &Config, console: &mut Console<W>) {
    let max_len = console.width().saturating_sub(SUMMARY_LABEL_WIDTH);

    console.println("");
    console.rule();
    console.println(&format!(" Database:    {}", config.redacted_connection()));
    console.println(&format!(
        " ArtefactDir: {}",
        shorten_path(&config.artefact_directory, max_len)
    ));
    if let Some(run_dir) = config.run_directory() {
        console.println(&format!(" RunDir:      {}", shorten_path(run_dir, max_len)));
    }
    console.println(&format!(" Save Change: {}", config.apply));
    console.rule();
}
