//! No-op applier used until an apply implementation exists.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::warn;

use super::MigrationApplier;
use crate::config::Config;
use crate::error::Result;

/// Applier that changes nothing.
///
/// Logs a warning on first use.
pub struct NoOpApplier {
    warned: AtomicBool,
}

impl NoOpApplier {
    /// Create a new no-op applier.
    pub fn new() -> Self {
        Self {
            warned: AtomicBool::new(false),
        }
    }

    fn warn_once(&self) {
        if !self.warned.swap(true, Ordering::SeqCst) {
            warn!("Using no-op applier: no database or folder changes will be made.");
        }
    }
}

impl Default for NoOpApplier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MigrationApplier for NoOpApplier {
    async fn apply(&self, _config: &Config) -> Result<()> {
        self.warn_once();
        Ok(())
    }

    fn applier_type(&self) -> &'static str {
        "noop"
    }
}
