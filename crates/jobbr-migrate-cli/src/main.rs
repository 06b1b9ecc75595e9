//! jobbr-migrate CLI - validate and migrate a Jobbr installation.

use clap::Parser;
use jobbr_migrate::{Config, Console, MigrateError, Orchestrator, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "jobbr-migrate")]
#[command(about = "Jobbr database and artefact migrator")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database connection string
    #[arg(short = 'd', long = "database", required_unless_present = "config")]
    database: Option<String>,

    /// Jobbr schema [default: Jobbr]
    #[arg(short, long)]
    schema: Option<String>,

    /// Path where artefacts are stored
    #[arg(short = 'a', long = "artefactdir", required_unless_present = "config")]
    artefact_dir: Option<String>,

    /// Path where run folders are created
    #[arg(short = 'r', long = "rundir")]
    run_dir: Option<String>,

    /// Apply changes to database and folders
    #[arg(long)]
    apply: bool,

    /// Table that must exist in the schema (repeat for each table)
    #[arg(long = "expected-table")]
    expected_tables: Vec<String>,

    /// Check the run directory itself instead of the artefact directory
    #[arg(long)]
    check_run_dir: bool,

    /// Connect timeout in seconds (default: no timeout)
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), MigrateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = build_config(cli)?;
    info!("Loaded configuration: {:?}", config);

    let orchestrator = Orchestrator::new(&config);
    let mut console = Console::stdout();

    match orchestrator.run(&config, &mut console).await? {
        RunOutcome::Aborted => Err(MigrateError::Validation),
        RunOutcome::Validated | RunOutcome::Applied => Ok(()),
    }
}

/// Merge the optional config file with command-line overrides.
fn build_config(cli: Cli) -> Result<Config, MigrateError> {
    let mut config = match cli.config {
        Some(ref path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => {
            let database = cli
                .database
                .clone()
                .ok_or_else(|| MigrateError::Config("--database is required".into()))?;
            let artefact_dir = cli
                .artefact_dir
                .clone()
                .ok_or_else(|| MigrateError::Config("--artefactdir is required".into()))?;
            Config::new(database, artefact_dir)
        }
    };

    // Apply overrides
    if let Some(database) = cli.database {
        config.database_connection = database;
    }
    if let Some(schema) = cli.schema {
        config.schema = schema;
    }
    if let Some(dir) = cli.artefact_dir {
        config.artefact_directory = dir;
    }
    if let Some(dir) = cli.run_dir {
        config.run_directory = Some(dir);
    }
    if cli.apply {
        config.apply = true;
    }
    if !cli.expected_tables.is_empty() {
        config.validation.expected_tables = cli.expected_tables;
    }
    if cli.check_run_dir {
        config.validation.check_run_directory = true;
    }
    if let Some(secs) = cli.connect_timeout {
        config.validation.connect_timeout_secs = Some(secs);
    }

    config.validate()?;
    Ok(config)
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the validation report
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
