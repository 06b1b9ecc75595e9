//! Database reachability check.

use tracing::{debug, warn};

use super::ValidationResult;
use crate::catalog::CatalogClient;

/// Opens one session and reports what it connected to.
pub struct ConnectivityChecker<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CatalogClient + ?Sized> ConnectivityChecker<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Single connect attempt; errors become a failed result.
    pub async fn check(&self, connection: &str) -> ValidationResult {
        match self.catalog.connect(connection).await {
            Ok(info) if info.is_open => {
                debug!(
                    "Connected to {} with database '{}'",
                    info.data_source, info.database
                );
                ValidationResult::passed(format!(
                    " Connected to {} with database '{}'",
                    info.data_source, info.database
                ))
            }
            // Session came up without error but is not usable.
            Ok(_) => ValidationResult::failed(""),
            Err(e) => {
                warn!("Database connection failed: {}", e);
                e.into()
            }
        }
    }
}
