//! Entry points for viewer commands.
//!
//! - `run_list`: Print the catalog as a table
//! - `run_show`: Fetch one record's artifact and show it annotated
//! - `run_browse`: Handle a stream of selections from an input
//! - `run_check`: Report line-range and id problems in the catalog
//! - `run_docs`: Render a markdown document to HTML

pub mod browse;
pub mod check;
pub mod docs;
pub mod list;
pub mod show;

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Catalog, Config};
use crate::services::{
    AnnotationRenderer, ArtifactFetcher, DirectoryFetcher, HttpFetcher, SelectionController,
    TextSurface,
};
use crate::storage::{BundledCatalog, CatalogStore, LocalCatalog};

pub use browse::run_browse;
pub use check::run_check;
pub use docs::run_docs;
pub use list::run_list;
pub use show::run_show;

/// Load the catalog named by the configuration, or the bundled one when no
/// path is set.
pub async fn open_catalog(config: &Config) -> Result<Arc<Catalog>> {
    let store = match &config.catalog.path {
        Some(path) => CatalogStore::new(LocalCatalog::new(path)),
        None => CatalogStore::new(BundledCatalog::default()),
    };
    store.load().await
}

/// Pick the artifact fetcher: a local corpus directory when configured,
/// HTTP otherwise.
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn ArtifactFetcher>> {
    match &config.fetcher.corpus_dir {
        Some(dir) => {
            log::info!("Reading artifacts from {}", dir.display());
            Ok(Arc::new(DirectoryFetcher::new(
                dir,
                config.artifacts.clone(),
            )))
        }
        None => {
            log::info!("Fetching artifacts from {}", config.fetcher.base_url);
            Ok(Arc::new(HttpFetcher::new(
                &config.fetcher,
                config.artifacts.clone(),
            )?))
        }
    }
}

/// Controller drawing on a terminal-sized text surface.
pub fn build_controller(config: &Config) -> Result<SelectionController<TextSurface>> {
    let fetcher = build_fetcher(config)?;
    let renderer = AnnotationRenderer::new(TextSurface::new(config.display.viewport_height));
    Ok(SelectionController::new(fetcher, renderer))
}
