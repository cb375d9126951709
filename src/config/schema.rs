//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::entries::{ManualEntries, DEFAULT_MARKER, DEFAULT_MODULE_PREFIX, ROOT_CHUNK_NAME};

/// Page discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Directory scanned for pages, relative to the config file
    pub root: String,

    /// File name pattern marking a page directory
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Prefix joined with page paths to form module references
    #[serde(default = "default_module_prefix")]
    pub module_prefix: String,

    /// Entry name for a page located directly in the root
    #[serde(default = "default_root_name")]
    pub root_name: String,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_module_prefix() -> String {
    DEFAULT_MODULE_PREFIX.to_string()
}

fn default_root_name() -> String {
    ROOT_CHUNK_NAME.to_string()
}

/// Baseline and manual entry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntriesConfig {
    /// Modules prepended to every page entry
    #[serde(default)]
    pub baseline: Vec<String>,

    /// Manually declared entries; these win over page entries of the same name
    #[serde(default)]
    pub manual: ManualEntries,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File the entry map is written to; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Pretty-print the JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: None,
            pretty: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce window for filesystem events
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    200
}
