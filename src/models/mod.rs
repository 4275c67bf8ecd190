// src/models/mod.rs

//! Domain models for the viewer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod document;
mod record;

// Re-export all public types
pub use catalog::Catalog;
pub use config::{ArtifactNaming, CatalogConfig, Config, DisplayConfig, FetcherConfig};
pub use document::DisplayedDocument;
pub use record::{LineRange, Record};
