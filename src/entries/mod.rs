//! Entry map builder
//!
//! Turns a directory tree of page modules into named bundle entry points.
//! Every automatic entry loads, in order:
//! - the baseline modules shared by all automatic entries
//! - the module of each ancestor page, most distant first
//! - the page's own module
//!
//! Manually declared entries are merged on top and win on name collisions.

mod chunk;
mod discovery;
mod error;
mod tree;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use chunk::{
    derive_chunk_name, find_ancestors, is_valid_entry_name, ChunkName, PagePath, ROOT_CHUNK_NAME,
    SEGMENT_SEPARATOR,
};
pub use discovery::{discover_pages, PageMarker, DEFAULT_MARKER};
pub use error::{EntryError, Result};
pub use tree::ChunkTree;

/// Default prefix joined with page paths to form module references
pub const DEFAULT_MODULE_PREFIX: &str = ".";

/// Manually declared entries: name to ordered module references
pub type ManualEntries = BTreeMap<String, Vec<String>>;

/// Ordered module references making up one entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryModuleList(Vec<String>);

impl EntryModuleList {
    pub fn new(modules: Vec<String>) -> Self {
        Self(modules)
    }

    pub fn modules(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Entry point name to module list, keyed in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryMap(BTreeMap<String, EntryModuleList>);

impl EntryMap {
    pub fn get(&self, name: &str) -> Option<&EntryModuleList> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntryModuleList)> {
        self.0.iter().map(|(name, list)| (name.as_str(), list))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize as a JSON object `{ name: [module, ...] }`
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Stable content hash, equal for equal maps
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let json = self.to_json(false)?;
        Ok(crate::utils::fingerprint(json.as_bytes()))
    }

    fn insert(&mut self, name: String, list: EntryModuleList) -> Option<EntryModuleList> {
        self.0.insert(name, list)
    }
}

/// Result of one build pass
#[derive(Debug, Clone)]
pub struct EntryBuild {
    /// The merged entry map
    pub entries: EntryMap,

    /// Number of entries generated from pages
    pub auto_entry_count: usize,

    /// Automatic entry names replaced by a manual entry
    pub overridden: Vec<String>,

    /// Directories whose changes invalidate the entry map
    pub watch_paths: Vec<PathBuf>,

    /// Page hierarchy the automatic entries were built from
    pub tree: ChunkTree,
}

/// Module reference for a page: `{prefix}/{page path}`
pub fn module_ref(module_prefix: &str, page: &PagePath) -> String {
    format!("{}/{}", module_prefix.trim_end_matches('/'), page.module_path())
}

/// Baseline modules, then ancestor pages most distant first, then the page
pub fn build_entry_module_list(
    page: &PagePath,
    ancestors: &[&PagePath],
    baseline: &[String],
    module_prefix: &str,
) -> EntryModuleList {
    let mut modules = Vec::with_capacity(baseline.len() + ancestors.len() + 1);
    modules.extend(baseline.iter().cloned());
    modules.extend(ancestors.iter().map(|ancestor| module_ref(module_prefix, ancestor)));
    modules.push(module_ref(module_prefix, page));
    EntryModuleList(modules)
}

/// Build the entry map for `root` with default naming
///
/// Manual entries override automatic entries of the same name.
pub fn build(root: &Path, baseline: &[String], manual: &ManualEntries) -> Result<EntryMap> {
    EntryMapBuilder::new(root)
        .baseline(baseline.to_vec())
        .manual(manual.clone())
        .build()
        .map(|build| build.entries)
}

/// Configurable entry map builder
#[derive(Debug, Clone)]
pub struct EntryMapBuilder {
    root: PathBuf,
    marker: Option<PageMarker>,
    baseline: Vec<String>,
    manual: ManualEntries,
    module_prefix: String,
    root_name: String,
}

impl EntryMapBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            marker: None,
            baseline: Vec::new(),
            manual: ManualEntries::new(),
            module_prefix: DEFAULT_MODULE_PREFIX.to_string(),
            root_name: ROOT_CHUNK_NAME.to_string(),
        }
    }

    pub fn marker(mut self, marker: PageMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn baseline(mut self, baseline: Vec<String>) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn manual(mut self, manual: ManualEntries) -> Self {
        self.manual = manual;
        self
    }

    pub fn module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = prefix.into();
        self
    }

    /// Entry name used for a page located directly at the root
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the page root and assemble the entry map
    pub fn build(&self) -> Result<EntryBuild> {
        self.check_manual_entries()?;

        let marker = match &self.marker {
            Some(marker) => marker.clone(),
            None => PageMarker::new(DEFAULT_MARKER)?,
        };

        let pages = discover_pages(&self.root, &marker)?;
        let chunks = self.name_pages(&pages)?;
        let tree = ChunkTree::new(chunks.keys().cloned());

        let mut entries = EntryMap::default();

        for (chunk, page) in &chunks {
            let ancestor_pages: Vec<&PagePath> = tree
                .ancestors(chunk)
                .into_iter()
                .filter_map(|ancestor| chunks.get(ancestor))
                .collect();

            let list = build_entry_module_list(
                page,
                &ancestor_pages,
                &self.baseline,
                &self.module_prefix,
            );

            let name = chunk.render(&self.root_name);
            debug!(
                "Entry {} (depth {}) <- {} module(s)",
                name,
                chunk.depth(),
                list.len()
            );
            entries.insert(name, list);
        }

        let auto_entry_count = entries.len();
        let mut overridden = Vec::new();

        for (name, modules) in &self.manual {
            if entries
                .insert(name.clone(), EntryModuleList::new(modules.clone()))
                .is_some()
            {
                warn!("Manual entry '{}' overrides the page entry of the same name", name);
                overridden.push(name.clone());
            }
        }

        info!(
            "Generated {} page entr{} and {} manual entr{}",
            auto_entry_count,
            if auto_entry_count == 1 { "y" } else { "ies" },
            self.manual.len(),
            if self.manual.len() == 1 { "y" } else { "ies" },
        );

        Ok(EntryBuild {
            entries,
            auto_entry_count,
            overridden,
            watch_paths: vec![self.root.clone()],
            tree,
        })
    }

    /// Derive a chunk name for every page, rejecting names claimed twice
    fn name_pages(&self, pages: &BTreeSet<PagePath>) -> Result<BTreeMap<ChunkName, PagePath>> {
        let mut chunks = BTreeMap::new();
        let mut claimed: BTreeMap<String, &PagePath> = BTreeMap::new();

        for page in pages {
            let chunk = derive_chunk_name(page)?;
            let name = chunk.render(&self.root_name);

            if let Some(first) = claimed.insert(name.clone(), page) {
                return Err(EntryError::DuplicateChunkName {
                    name,
                    first: first.as_path().to_path_buf(),
                    second: page.as_path().to_path_buf(),
                });
            }

            chunks.insert(chunk, page.clone());
        }

        Ok(chunks)
    }

    fn check_manual_entries(&self) -> Result<()> {
        if !is_valid_entry_name(&self.root_name) {
            return Err(EntryError::InvalidManualEntry {
                name: self.root_name.clone(),
                reason: "root page name must be non-empty and free of path separators".to_string(),
            });
        }

        for (name, modules) in &self.manual {
            if !is_valid_entry_name(name) {
                return Err(EntryError::InvalidManualEntry {
                    name: name.clone(),
                    reason: "name must be non-empty and free of path separators".to_string(),
                });
            }
            if modules.is_empty() {
                return Err(EntryError::InvalidManualEntry {
                    name: name.clone(),
                    reason: "module list is empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
