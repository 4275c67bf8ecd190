//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::url::parse_base;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Artifact retrieval settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Naming convention of published artifacts
    #[serde(default)]
    pub artifacts: ArtifactNaming,

    /// Catalog index location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Terminal presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        parse_base(&self.fetcher.base_url)?;
        if self.artifacts.prefix.is_empty() {
            return Err(AppError::validation("artifacts.prefix is empty"));
        }
        if self.display.viewport_height == 0 {
            return Err(AppError::validation("display.viewport_height must be > 0"));
        }
        if self.display.cell_width < 4 {
            return Err(AppError::validation("display.cell_width must be >= 4"));
        }
        Ok(())
    }
}

/// Artifact retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL the retrieval key is appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Read artifacts from this directory instead of over HTTP
    #[serde(default)]
    pub corpus_dir: Option<PathBuf>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            corpus_dir: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Naming convention used when the artifact corpus was published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactNaming {
    #[serde(default = "defaults::key_prefix")]
    pub prefix: String,

    /// Between the record id and the file hash
    #[serde(default = "defaults::key_separator")]
    pub separator: String,

    #[serde(default = "defaults::key_extension")]
    pub extension: String,
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self {
            prefix: defaults::key_prefix(),
            separator: defaults::key_separator(),
            extension: defaults::key_extension(),
        }
    }
}

/// Catalog index location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Index file to read; the catalog bundled with the binary when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Where the catalog comes from, for messages.
    pub fn location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "bundled catalog".to_string(),
        }
    }
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of source lines shown in the code view
    #[serde(default = "defaults::viewport_height")]
    pub viewport_height: usize,

    /// Maximum width of a text cell in the record table
    #[serde(default = "defaults::cell_width")]
    pub cell_width: usize,

    /// Descriptive fields shown as extra table columns
    #[serde(default = "defaults::table_fields")]
    pub table_fields: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport_height: defaults::viewport_height(),
            cell_width: defaults::cell_width(),
            table_fields: defaults::table_fields(),
        }
    }
}

mod defaults {
    // Fetcher defaults
    pub fn base_url() -> String {
        "http://127.0.0.1:8000/all_bug_files/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; leakview/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Artifact naming defaults
    pub fn key_prefix() -> String {
        "bug-".into()
    }
    pub fn key_separator() -> String {
        "-".into()
    }
    pub fn key_extension() -> String {
        ".java".into()
    }

    // Display defaults
    pub fn viewport_height() -> usize {
        24
    }
    pub fn cell_width() -> usize {
        28
    }
    pub fn table_fields() -> Vec<String> {
        vec!["rootCause".into(), "fixApproach".into()]
    }
}
