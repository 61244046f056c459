//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use helix_api::InMemorySource;
use helix_cache::Cache;
use helix_commerce::catalog::ProductCatalog;
use helix_commerce::personalization::PersonalizationResolver;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["helix.toml", ".helix.toml", "helix.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative paths resolve against: the config file's
    /// directory when one was found, else the working directory.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let found = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                Some((CliConfig::load(&path)?, path))
            }
            None => find_config(&cwd),
        };

        let (config, root) = match found {
            Some((config, path)) => {
                output.debug(&format!("Using config {}", path.display()));
                let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
                (config, root)
            }
            None => (CliConfig::default(), cwd),
        };

        Ok(Self {
            config,
            output,
            root,
        })
    }

    /// Resolve a path relative to the context root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.root, path)
    }

    /// The profile store, or an unavailable one when disabled.
    pub fn cache(&self) -> Result<Cache> {
        if !self.config.store.enabled {
            return Ok(Cache::unavailable());
        }
        let dir = self.resolve_path(&self.config.store.path);
        Cache::open_dir(dir.clone())
            .with_context(|| format!("Failed to open profile store at {}", dir.display()))
    }

    /// The configured catalog, or the sample one.
    pub fn catalog(&self) -> Result<ProductCatalog> {
        let Some(path) = &self.config.catalog.path else {
            return Ok(ProductCatalog::sample());
        };
        let path = self.resolve_path(path);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        ProductCatalog::from_json(&json)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    /// The catalog behind the configured latency.
    pub fn source(&self) -> Result<InMemorySource> {
        Ok(InMemorySource::new(self.catalog()?).with_latency(self.config.catalog.latency()))
    }

    /// The visitor's resolver, loaded from the profile store.
    pub fn resolver(&self) -> Result<PersonalizationResolver> {
        let cache = self.cache()?;
        if !cache.is_available() {
            self.output.warn("Profile store disabled; changes will not persist");
        }
        Ok(PersonalizationResolver::load(cache))
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".helix.toml"), "[store]\nenabled = false\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert!(!config.store.enabled);
        assert_eq!(path, dir.path().join(".helix.toml"));
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let products = serde_json::to_string(&ProductCatalog::sample().all()[..2]).unwrap();
        std::fs::write(dir.path().join("products.json"), products).unwrap();

        let mut config = CliConfig::default();
        config.catalog.path = Some("products.json".into());
        let ctx = Context {
            config,
            output: Output::new(false, true),
            root: dir.path().to_path_buf(),
        };
        assert_eq!(ctx.catalog().unwrap().len(), 2);
    }

    #[test]
    fn test_profile_persists_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            root: dir.path().to_path_buf(),
        };

        let mut resolver = ctx.resolver().unwrap();
        resolver.update_category("Accessories");

        let reloaded = ctx.resolver().unwrap();
        assert_eq!(reloaded.profile().category.as_deref(), Some("Accessories"));
        assert!(dir.path().join(".helix/store").is_dir());
    }
}
