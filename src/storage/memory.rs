//! Catalog index held in memory, e.g. compiled into the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::CatalogSource;

/// The catalog shipped with the crate.
pub const BUNDLED_INDEX: &str = include_str!("../../data/catalog.json");

/// In-memory catalog source.
#[derive(Debug, Clone)]
pub struct BundledCatalog {
    index: String,
}

impl BundledCatalog {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
        }
    }
}

impl Default for BundledCatalog {
    fn default() -> Self {
        Self::new(BUNDLED_INDEX)
    }
}

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn read_index(&self) -> Result<Vec<u8>> {
        Ok(self.index.as_bytes().to_vec())
    }

    fn describe(&self) -> String {
        "bundled catalog".to_string()
    }
}
