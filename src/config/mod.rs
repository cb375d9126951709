//! Configuration handling for autoentry
//!
//! Parses and manages autoentry.toml configuration files.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::entries::{is_valid_entry_name, EntryMapBuilder, ManualEntries, PageMarker};

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page discovery settings
    pub pages: PagesConfig,

    /// Baseline modules and manual entries
    #[serde(default)]
    pub entries: EntriesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::parse(&content, root)
            .with_context(|| format!("Invalid config file: {}", canonical_path.display()))
    }

    /// Parse and validate configuration text; relative paths resolve against `root`
    pub fn parse(content: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).context("Failed to parse autoentry.toml")?;

        config.root = root.into();
        config.validate()?;

        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        let baseline = vec!["babel-polyfill".to_string(), "./main.js".to_string()];
        let mut manual = ManualEntries::new();
        manual.insert("main".to_string(), baseline.clone());

        Self {
            pages: PagesConfig {
                root: "src/assets/javascripts/pages".to_string(),
                marker: crate::entries::DEFAULT_MARKER.to_string(),
                module_prefix: "./pages".to_string(),
                root_name: crate::entries::ROOT_CHUNK_NAME.to_string(),
            },
            entries: EntriesConfig { baseline, manual },
            output: OutputConfig::default(),
            watch: WatchConfig::default(),
            root: PathBuf::from("."),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.pages.root.trim().is_empty() {
            anyhow::bail!("pages.root must not be empty");
        }

        PageMarker::new(&self.pages.marker)?;

        if self.pages.module_prefix.is_empty() {
            anyhow::bail!("pages.module_prefix must not be empty");
        }

        if !is_valid_entry_name(&self.pages.root_name) {
            anyhow::bail!(
                "pages.root_name '{}' is not a valid entry name",
                self.pages.root_name
            );
        }

        for (name, modules) in &self.entries.manual {
            if !is_valid_entry_name(name) {
                anyhow::bail!("Manual entry '{}' is not a valid entry name", name);
            }
            if modules.is_empty() {
                anyhow::bail!("Manual entry '{}' has no modules", name);
            }
        }

        if self.watch.debounce_ms == 0 {
            anyhow::bail!("watch.debounce_ms must be greater than zero");
        }

        Ok(())
    }

    /// Get the absolute page root path
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(&self.pages.root)
    }

    /// Get the absolute output file path, if one is configured
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.file.as_ref().map(|file| self.root.join(file))
    }

    /// Entry map builder configured from this file
    pub fn entry_builder(&self) -> Result<EntryMapBuilder> {
        let marker = PageMarker::new(&self.pages.marker)?;

        Ok(EntryMapBuilder::new(self.pages_dir())
            .marker(marker)
            .baseline(self.entries.baseline.clone())
            .manual(self.entries.manual.clone())
            .module_prefix(self.pages.module_prefix.clone())
            .root_name(self.pages.root_name.clone()))
    }
}
