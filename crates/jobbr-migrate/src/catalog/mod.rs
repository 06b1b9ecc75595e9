//! Database access used by the pre-flight checks.
//!
//! Checks talk to the database only through [`CatalogClient`]. Each call opens
//! its own session and drops it before returning; nothing is pooled.

mod mssql;

pub use mssql::MssqlCatalog;

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

/// Identifying metadata of an opened session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Server address the session is connected to.
    pub data_source: String,
    /// Database selected by the session.
    pub database: String,
    /// Whether the session reported itself open after connecting.
    pub is_open: bool,
}

/// A table name paired with its containing schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedTableName {
    pub schema: String,
    pub table: String,
}

impl QualifiedTableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Read-only access to a database catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Open a session and report what it connected to.
    async fn connect(&self, connection: &str) -> Result<ConnectionInfo>;

    /// List the tables under `schema`, matched exactly by name.
    async fn tables_in_schema(
        &self,
        connection: &str,
        schema: &str,
    ) -> Result<Vec<QualifiedTableName>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_display() {
        let name = QualifiedTableName::new("Jobbr", "Jobs");
        assert_eq!(name.to_string(), "Jobbr.Jobs");
    }
}
