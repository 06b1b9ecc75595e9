//! CLI integration tests for jobbr-migrate.
//!
//! These tests verify command-line argument parsing, help output,
//! and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Connection string pointing at a port nothing listens on.
const UNREACHABLE_DB: &str = "Server=tcp:127.0.0.1,1;Database=Jobbr;User Id=sa;Password=secret";

/// Get a command for the jobbr-migrate binary.
fn cmd() -> Command {
    Command::cargo_bin("jobbr-migrate").unwrap()
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--artefactdir"))
        .stdout(predicate::str::contains("--rundir"))
        .stdout(predicate::str::contains("--apply"))
        .stdout(predicate::str::contains("--expected-table"))
        .stdout(predicate::str::contains("--check-run-dir"))
        .stdout(predicate::str::contains("--connect-timeout"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jobbr-migrate"));
}

#[test]
fn test_log_flags_have_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn test_missing_required_arguments() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--database"))
        .stderr(predicate::str::contains("--artefactdir"));
}

#[test]
fn test_missing_config_exits_with_code_7() {
    cmd()
        .args(["--config", "nonexistent_config_file.yaml"])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "invalid: yaml: content: [").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap()])
        .assert()
        .code(1);
}

#[test]
fn test_missing_required_fields_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "schema: Jobbr").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap()])
        .assert()
        .code(1);
}

#[test]
fn test_zero_connect_timeout_exits_with_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    cmd()
        .args(["-d", UNREACHABLE_DB, "-a", dir.path().to_str().unwrap()])
        .args(["--connect-timeout", "0"])
        .assert()
        .code(1);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_unreachable_database_aborts_before_other_checks() {
    let dir = tempfile::TempDir::new().unwrap();
    cmd()
        .args(["-d", UNREACHABLE_DB, "-a", dir.path().to_str().unwrap()])
        .args(["--connect-timeout", "10", "--verbosity", "error"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Jobbr Migrator"))
        .stdout(predicate::str::contains("Validating Configuration"))
        .stdout(predicate::str::contains(" - Database:   Failed."))
        .stdout(predicate::str::contains("Tables").not())
        .stdout(predicate::str::contains("ArtefactDir").not())
        .stdout(predicate::str::contains("Save Change").not());
}

#[test]
fn test_config_file_values_are_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "database_connection: \"{}\"", UNREACHABLE_DB).unwrap();
    writeln!(file, "artefact_directory: \"{}\"", dir.path().display()).unwrap();
    writeln!(file, "validation:").unwrap();
    writeln!(file, "  connect_timeout_secs: 10").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "--verbosity", "error"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(" - Database:   Failed."));
}
