// src/error.rs

//! Unified error handling for the viewer.

use std::fmt;

use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The catalog index could not be read or parsed
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// Retrieving the artifact for a record failed
    #[error("Fetch error for record {id}: {cause}")]
    Fetch { id: u64, cause: String },

    /// A record's line range does not fit the fetched content
    #[error(
        "Line range {start}..={end} of record {id} does not fit content of {line_count} lines"
    )]
    RangeInconsistency {
        id: u64,
        start: usize,
        end: usize,
        line_count: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Regular expression failed to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A syntax grammar could not be loaded
    #[error("Grammar error: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a catalog load error.
    pub fn catalog(message: impl fmt::Display) -> Self {
        Self::CatalogLoad(message.to_string())
    }

    /// Create a fetch error for the given record id.
    pub fn fetch(id: u64, cause: impl fmt::Display) -> Self {
        Self::Fetch {
            id,
            cause: cause.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
