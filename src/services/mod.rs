//! Service layer for the viewer.
//!
//! This module contains the business logic for:
//! - Artifact retrieval (`HttpFetcher`, `DirectoryFetcher`)
//! - Code display (`TextSurface`) and defect annotation (`AnnotationRenderer`)
//! - Selection handling (`SelectionController`)
//! - Document rendering (`MarkdownRenderer`)

pub mod annotate;
pub mod document;
pub mod fetcher;
pub mod selection;
pub mod surface;

pub use annotate::{AnnotationRenderer, RenderReport};
pub use document::{DocumentRenderer, MarkdownRenderer};
pub use fetcher::{ArtifactFetcher, DirectoryFetcher, HttpFetcher};
pub use selection::{SelectionController, SelectionOutcome, SelectionStats};
pub use surface::{CodeSurface, TextSurface};
