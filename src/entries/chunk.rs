//! Page paths and the chunk names derived from them

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::error::{EntryError, Result};

/// Name used for a page sitting directly in the page root
pub const ROOT_CHUNK_NAME: &str = "_root";

/// Separator between chunk name segments
pub const SEGMENT_SEPARATOR: char = '.';

/// A page module, relative to the page root, ending in the marker file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PagePath(PathBuf);

impl PagePath {
    pub fn new(relative: impl Into<PathBuf>) -> Self {
        Self(relative.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form used inside module references
    pub fn module_path(&self) -> String {
        crate::utils::module_path(&self.0)
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path())
    }
}

/// Dot-separated identity of a page chunk
///
/// Stored as segments; the root page has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkName {
    segments: Vec<String>,
}

impl ChunkName {
    /// The chunk of a page located directly at the page root
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted name such as `a.b.c`. The empty string is the root chunk.
    #[cfg(test)]
    pub(crate) fn from_dotted(name: &str) -> Self {
        if name.is_empty() {
            return Self::root();
        }
        Self::from_segments(name.split(SEGMENT_SEPARATOR))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Entry name for this chunk, substituting `root_name` for the root chunk
    pub fn render(&self, root_name: &str) -> String {
        if self.is_root() {
            root_name.to_string()
        } else {
            self.segments.join(&SEGMENT_SEPARATOR.to_string())
        }
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ROOT_CHUNK_NAME))
    }
}

/// Derive the chunk name of a page: drop the marker file, join directories with dots
pub fn derive_chunk_name(page: &PagePath) -> Result<ChunkName> {
    let path = page.as_path();

    if path.file_name().is_none() {
        return Err(EntryError::malformed(path, "missing marker file name"));
    }

    let directory = path.parent().unwrap_or(Path::new(""));
    let mut segments = Vec::new();

    for component in directory.components() {
        match component {
            Component::Normal(os) => {
                let segment = os
                    .to_str()
                    .ok_or_else(|| EntryError::malformed(path, "directory name is not valid UTF-8"))?;
                check_segment(segment).map_err(|reason| EntryError::malformed(path, reason))?;
                segments.push(segment.to_string());
            }
            Component::CurDir => continue,
            other => {
                return Err(EntryError::malformed(
                    path,
                    format!("unexpected path component {:?}", other.as_os_str()),
                ));
            }
        }
    }

    Ok(ChunkName { segments })
}

fn check_segment(segment: &str) -> std::result::Result<(), String> {
    if segment.is_empty() {
        return Err("empty directory name".to_string());
    }
    if segment.contains(SEGMENT_SEPARATOR) {
        return Err(format!(
            "directory '{}' contains '{}', which is the chunk name separator",
            segment, SEGMENT_SEPARATOR
        ));
    }
    if segment.contains('\\') || segment.contains('/') {
        return Err(format!("directory '{}' contains a path separator", segment));
    }
    Ok(())
}

/// Existing ancestors of `name`, most distant first
///
/// Every shorter prefix down to the root is tested, so a missing
/// intermediate page does not hide the ones above it.
pub fn find_ancestors(name: &ChunkName, known: &BTreeSet<ChunkName>) -> Vec<ChunkName> {
    let mut segments = name.segments.clone();
    let mut found = Vec::new();

    while segments.pop().is_some() {
        let candidate = ChunkName::from_segments(segments.iter().cloned());
        if known.contains(&candidate) {
            found.push(candidate);
        }
    }

    // collected nearest-first
    found.reverse();
    found
}

/// Whether `name` can be handed to the bundler as an entry point name
pub fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> BTreeSet<ChunkName> {
        names.iter().map(|n| ChunkName::from_dotted(n)).collect()
    }

    fn dotted(names: Vec<ChunkName>) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_derive_chunk_name() {
        let name = derive_chunk_name(&PagePath::new("a/b/c/index.js")).unwrap();
        assert_eq!(name.to_string(), "a.b.c");
        assert_eq!(name.depth(), 3);
    }

    #[test]
    fn test_derive_root_page() {
        let name = derive_chunk_name(&PagePath::new("index.js")).unwrap();
        assert!(name.is_root());
        assert_eq!(name.to_string(), ROOT_CHUNK_NAME);
        assert_eq!(name.render("home"), "home");
    }

    #[test]
    fn test_derive_rejects_dotted_directory() {
        let err = derive_chunk_name(&PagePath::new("a.b/index.js")).unwrap_err();
        assert!(matches!(err, EntryError::MalformedPagePath { .. }));
    }

    #[test]
    fn test_derive_rejects_parent_component() {
        let err = derive_chunk_name(&PagePath::new("../a/index.js")).unwrap_err();
        assert!(matches!(err, EntryError::MalformedPagePath { .. }));
    }

    #[test]
    fn test_find_ancestors_full_chain() {
        let known = known(&["a", "a.b", "a.b.c"]);
        let ancestors = find_ancestors(&ChunkName::from_dotted("a.b.c"), &known);
        assert_eq!(dotted(ancestors), vec!["a", "a.b"]);
    }

    #[test]
    fn test_find_ancestors_skips_missing_intermediate() {
        let known = known(&["a", "a.b.c"]);
        let ancestors = find_ancestors(&ChunkName::from_dotted("a.b.c"), &known);
        assert_eq!(dotted(ancestors), vec!["a"]);
    }

    #[test]
    fn test_find_ancestors_includes_root_page() {
        let mut known = known(&["a.b"]);
        known.insert(ChunkName::root());
        let ancestors = find_ancestors(&ChunkName::from_dotted("a.b"), &known);
        assert_eq!(ancestors, vec![ChunkName::root()]);
        assert!(find_ancestors(&ChunkName::root(), &known).is_empty());
    }

    #[test]
    fn test_find_ancestors_ignores_siblings() {
        let known = known(&["a", "ab", "a.c"]);
        let ancestors = find_ancestors(&ChunkName::from_dotted("a.b"), &known);
        assert_eq!(dotted(ancestors), vec!["a"]);
    }

    #[test]
    fn test_entry_name_validation() {
        assert!(is_valid_entry_name("users.show"));
        assert!(!is_valid_entry_name(""));
        assert!(!is_valid_entry_name("users/show"));
    }
}
