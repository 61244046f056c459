//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use helix_api::Latency;
use helix_commerce::page::{CatalogFields, TextField};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Profile storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Product data.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Catalog page fields, as the CMS would supply them.
    #[serde(default)]
    pub page: PageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Where the personalization profile lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the file-backed store.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// When false, the store behaves as unavailable and nothing persists.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_store_path() -> String {
    ".helix/store".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            enabled: true,
        }
    }
}

/// Product data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON product list replacing the sample catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Simulated fetch delay for every call. Unset keeps the defaults of
    /// 300ms for listings and 200ms for single lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl CatalogConfig {
    pub fn latency(&self) -> Latency {
        self.latency_ms
            .map(|ms| Latency::uniform(Duration::from_millis(ms)))
            .unwrap_or_default()
    }
}

/// Raw catalog page fields. Values stay strings; parsing happens in
/// [`helix_commerce::page::CatalogSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ratings: Option<String>,
}

impl PageConfig {
    pub fn to_fields(&self) -> CatalogFields {
        let field = |v: &Option<String>| v.as_deref().map(TextField::from);
        CatalogFields {
            heading: field(&self.heading),
            description: field(&self.description),
            items_per_page: field(&self.items_per_page),
            show_filters: field(&self.show_filters),
            show_ratings: field(&self.show_ratings),
        }
    }
}
