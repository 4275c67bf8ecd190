//! Catalog store and the sources it reads the index from.
//!
//! The index is a JSON array of records, read once per session:
//!
//! ```text
//! data/
//! └── catalog.json     # [{ "id": 1, "projectName": ..., "startLine": ..., ... }]
//! ```

pub mod local;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::models::Catalog;

// Re-export for convenience
pub use local::LocalCatalog;
pub use memory::BundledCatalog;

/// Trait for places a pre-built catalog index can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the raw index bytes.
    async fn read_index(&self) -> Result<Vec<u8>>;

    /// Human-readable location, used in log output.
    fn describe(&self) -> String;
}

/// Loads the catalog once and hands out the cached copy afterwards.
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    cached: OnceCell<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cached: OnceCell::new(),
        }
    }

    /// Load the catalog.
    ///
    /// The first successful call reads and parses the index; later calls
    /// return the same `Arc` without touching the source. A failed load
    /// exposes nothing.
    pub async fn load(&self) -> Result<Arc<Catalog>> {
        let catalog = self
            .cached
            .get_or_try_init(|| async {
                let location = self.source.describe();
                log::debug!("Reading catalog index from {}", location);
                let bytes = self.source.read_index().await?;
                let catalog = Catalog::from_json(&bytes)?;
                log::info!("Loaded {} records from {}", catalog.len(), location);
                Ok::<_, crate::error::AppError>(Arc::new(catalog))
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.initialized()
    }
}
