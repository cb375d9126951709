//! Page discovery
//!
//! Walks the page root and collects every file whose name matches the
//! page marker pattern.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use super::chunk::PagePath;
use super::error::{EntryError, Result};

/// Default marker identifying a directory as a page
pub const DEFAULT_MARKER: &str = "index.js";

/// File name pattern marking a page module, e.g. `index.js` or `index.{js,ts}`
#[derive(Debug, Clone)]
pub struct PageMarker {
    pattern: String,
    matcher: GlobMatcher,
}

impl PageMarker {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(EntryError::InvalidMarker {
                pattern: pattern.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(EntryError::InvalidMarker {
                pattern: pattern.to_string(),
                reason: "pattern must match a file name, not a path".to_string(),
            });
        }

        let glob = Glob::new(pattern).map_err(|e| EntryError::InvalidMarker {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, file_name: &OsStr) -> bool {
        self.matcher.is_match(file_name)
    }
}

/// Find every page under `root`
///
/// A missing root yields no pages. Symlinks are not followed, and hidden
/// entries (names starting with `.`) below the root are skipped.
pub fn discover_pages(root: &Path, marker: &PageMarker) -> Result<BTreeSet<PagePath>> {
    let mut pages = BTreeSet::new();

    if !root.exists() {
        debug!("Page root {} does not exist, no pages discovered", root.display());
        return Ok(pages);
    }

    if !root.is_dir() {
        return Err(EntryError::UnreadableRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    debug!("Scanning {} for '{}'", root.display(), marker.pattern());

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|e| EntryError::UnreadableRoot {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() || !marker.matches(entry.file_name()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| EntryError::malformed(entry.path(), "page lies outside the page root"))?;

        trace!("Found page {}", relative.display());
        pages.insert(PagePath::new(relative));
    }

    debug!("Discovered {} page(s)", pages.len());

    Ok(pages)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
