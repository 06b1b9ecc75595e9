//! Expected-tables check against the catalog.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::ValidationResult;
use crate::catalog::{CatalogClient, QualifiedTableName};
use crate::config::ValidationConfig;
use crate::error::MigrateError;

/// Tables in the Jobbr schema.
pub const JOBBR_TABLES: [&str; 3] = ["JobRuns", "Jobs", "Triggers"];

/// What the schema must contain to pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaExpectation {
    /// Exactly this many tables, whatever their names.
    Count(usize),
    /// Exactly these table names, no more and no fewer.
    Tables(BTreeSet<String>),
}

impl SchemaExpectation {
    /// The Jobbr table set by name.
    pub fn jobbr() -> Self {
        Self::Tables(JOBBR_TABLES.iter().map(|t| t.to_string()).collect())
    }

    fn is_met_by(&self, observed: &[QualifiedTableName]) -> bool {
        match self {
            SchemaExpectation::Count(count) => observed.len() == *count,
            SchemaExpectation::Tables(expected) => {
                let names: BTreeSet<String> =
                    observed.iter().map(|t| t.table.clone()).collect();
                names.len() == observed.len() && &names == expected
            }
        }
    }
}

impl Default for SchemaExpectation {
    fn default() -> Self {
        Self::Count(3)
    }
}

impl From<&ValidationConfig> for SchemaExpectation {
    fn from(config: &ValidationConfig) -> Self {
        if config.expected_tables.is_empty() {
            Self::Count(config.expected_table_count)
        } else {
            Self::Tables(config.expected_tables.iter().cloned().collect())
        }
    }
}

/// Confirms the configured schema holds the expected tables.
pub struct SchemaChecker<'a, C: ?Sized> {
    catalog: &'a C,
    expectation: SchemaExpectation,
}

impl<'a, C: CatalogClient + ?Sized> SchemaChecker<'a, C> {
    pub fn new(catalog: &'a C, expectation: SchemaExpectation) -> Self {
        Self {
            catalog,
            expectation,
        }
    }

    pub async fn check(&self, connection: &str, schema: &str) -> ValidationResult {
        let tables = match self.catalog.tables_in_schema(connection, schema).await {
            Ok(tables) => tables,
            Err(e) => {
                warn!("Catalog query for schema {} failed: {}", schema, e);
                return e.into();
            }
        };

        if !self.expectation.is_met_by(&tables) {
            debug!("Schema {} has {} tables: {:?}", schema, tables.len(), tables);
            return MigrateError::SchemaMismatch {
                schema: schema.to_string(),
                found: tables.len(),
            }
            .into();
        }

        let names: Vec<String> = tables.iter().map(ToString::to_string).collect();
        ValidationResult::passed(names.join(", "))
    }
}
