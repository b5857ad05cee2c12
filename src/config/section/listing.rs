//! `[listing]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [listing]
//! page_size = 3       # posts shown initially, and added per "Load More"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// List view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Posts per "Load More" step.
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: 3 }
    }
}

impl ListingConfig {
    pub const PAGE_SIZE: FieldPath = FieldPath::new("listing.page_size");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.page_size == 0 {
            diag.error(Self::PAGE_SIZE, "must be at least 1");
        }
    }
}
