//! Configuration validation.

use super::Config;
use crate::error::{MigrateError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.database_connection.trim().is_empty() {
        return Err(MigrateError::Config(
            "database_connection is required".into(),
        ));
    }
    if config.schema.trim().is_empty() {
        return Err(MigrateError::Config("schema must not be empty".into()));
    }
    if config.artefact_directory.trim().is_empty() {
        return Err(MigrateError::Config(
            "artefact_directory is required".into(),
        ));
    }

    if config.validation.expected_tables.is_empty()
        && config.validation.expected_table_count == 0
    {
        return Err(MigrateError::Config(
            "validation.expected_table_count must be at least 1".into(),
        ));
    }
    if config
        .validation
        .expected_tables
        .iter()
        .any(|t| t.trim().is_empty())
    {
        return Err(MigrateError::Config(
            "validation.expected_tables must not contain empty names".into(),
        ));
    }
    if let Some(0) = config.validation.connect_timeout_secs {
        return Err(MigrateError::Config(
            "validation.connect_timeout_secs must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config::new(
            "Server=tcp:localhost,1433;Database=Jobbr;User Id=sa;Password=secret",
            "/var/jobbr/artefacts",
        )
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_connection() {
        let mut config = valid_config();
        config.database_connection = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_artefact_directory() {
        let mut config = valid_config();
        config.artefact_directory = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_schema() {
        let mut config = valid_config();
        config.schema = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_table_count_without_names() {
        let mut config = valid_config();
        config.validation.expected_table_count = 0;
        assert!(validate(&config).is_err());

        config.validation.expected_tables = vec!["Jobs".into()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_expected_table_name() {
        let mut config = valid_config();
        config.validation.expected_tables = vec!["Jobs".into(), " ".into()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_connect_timeout() {
        let mut config = valid_config();
        config.validation.connect_timeout_secs = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_config_debug_redacts_password() {
        let mut config = valid_config();
        config.database_connection =
            "Server=db;Database=Jobbr;User Id=sa;Password=super_secret_password_123".into();
        let debug_output = format!("{:?}", config);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
