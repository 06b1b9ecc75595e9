//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection string keys whose values are never printed.
const SECRET_KEYS: &[&str] = &["password", "pwd"];

/// Root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// ADO-style SQL Server connection string.
    pub database_connection: String,

    /// Jobbr schema (default: "Jobbr").
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Directory where job artefacts are stored.
    pub artefact_directory: String,

    /// Directory where run folders are created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_directory: Option<String>,

    /// Apply changes to database and folders (default: false).
    #[serde(default)]
    pub apply: bool,

    /// Pre-flight validation behavior.
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Create a configuration with default validation settings.
    pub fn new(
        database_connection: impl Into<String>,
        artefact_directory: impl Into<String>,
    ) -> Self {
        Self {
            database_connection: database_connection.into(),
            schema: default_schema(),
            artefact_directory: artefact_directory.into(),
            run_directory: None,
            apply: false,
            validation: ValidationConfig::default(),
        }
    }

    /// Run directory, if one was given and is not blank.
    pub fn run_directory(&self) -> Option<&str> {
        self.run_directory
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
    }

    /// Connection string with secret values replaced by `[REDACTED]`.
    pub fn redacted_connection(&self) -> String {
        redact_connection_string(&self.database_connection)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_connection", &self.redacted_connection())
            .field("schema", &self.schema)
            .field("artefact_directory", &self.artefact_directory)
            .field("run_directory", &self.run_directory)
            .field("apply", &self.apply)
            .field("validation", &self.validation)
            .finish()
    }
}

/// Pre-flight validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Table names that must make up the schema exactly. When empty, only the
    /// number of tables is checked against `expected_table_count`.
    #[serde(default)]
    pub expected_tables: Vec<String>,

    /// Number of tables the schema must contain (default: 3).
    #[serde(default = "default_expected_table_count")]
    pub expected_table_count: usize,

    /// Check the run directory itself instead of the artefact directory.
    #[serde(default)]
    pub check_run_directory: bool,

    /// Connect timeout in seconds. Unbounded if not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_tables: Vec::new(),
            expected_table_count: default_expected_table_count(),
            check_run_directory: false,
            connect_timeout_secs: None,
        }
    }
}

/// Replace the values of password keys in an ADO connection string.
pub fn redact_connection_string(conn: &str) -> String {
    split_pairs(conn)
        .into_iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_key(key, SECRET_KEYS) => format!("{}=[REDACTED]", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Value of the last pair whose key is one of `keys`, with quotes removed.
pub fn connection_value(conn: &str, keys: &[&str]) -> Option<String> {
    split_pairs(conn).into_iter().rev().find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        is_key(key, keys).then(|| unquote(value.trim()))
    })
}

fn is_key(key: &str, keys: &[&str]) -> bool {
    keys.contains(&key.trim().to_lowercase().as_str())
}

/// Split on `;` outside of `"..."`, `'...'` and `{...}` values.
fn split_pairs(conn: &str) -> Vec<&str> {
    let mut pairs = Vec::new();
    let mut rest = conn;
    loop {
        let end = pair_end(rest);
        pairs.push(&rest[..end]);
        if end >= rest.len() {
            break;
        }
        rest = &rest[end + 1..];
    }
    pairs
}

/// Byte offset of the `;` ending the first pair, or the length of `s`.
/// An unterminated quote runs to the end.
fn pair_end(s: &str) -> usize {
    let bytes = s.as_bytes();
    let next_semi = |from: usize| s[from..].find(';').map_or(s.len(), |p| from + p);

    let eq = match s.find('=') {
        Some(eq) if eq < next_semi(0) => eq,
        _ => return next_semi(0),
    };

    let mut i = eq + 1;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }

    let close = match bytes.get(i) {
        Some(b'"') => b'"',
        Some(b'\'') => b'\'',
        Some(b'{') => b'}',
        _ => return next_semi(i),
    };

    i += 1;
    while i < bytes.len() {
        if bytes[i] == close {
            // doubled quote is an escaped quote
            if close != b'}' && bytes.get(i + 1) == Some(&close) {
                i += 2;
                continue;
            }
            return next_semi(i + 1);
        }
        i += 1;
    }
    s.len()
}

fn unquote(value: &str) -> String {
    let quoted = |open: char, close: char| {
        value.len() >= 2 && value.starts_with(open) && value.ends_with(close)
    };
    if quoted('"', '"') {
        value[1..value.len() - 1].replace("\"\"", "\"")
    } else if quoted('\'', '\'') {
        value[1..value.len() - 1].replace("''", "'")
    } else if quoted('{', '}') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

// Default value functions for serde
fn default_schema() -> String {
    "Jobbr".to_string()
}

fn default_expected_table_count() -> usize {
    3
}
