//! Chunk hierarchy

use std::collections::{BTreeMap, BTreeSet};

use super::chunk::{find_ancestors, ChunkName};

/// A registered chunk and its nearest existing ancestor
#[derive(Debug, Clone)]
struct ChunkNode {
    parent: Option<ChunkName>,
    children: BTreeSet<ChunkName>,
}

/// Tree over every known chunk name
///
/// Parent pointers are resolved once at construction, skipping prefixes
/// that are not themselves pages.
#[derive(Debug, Clone, Default)]
pub struct ChunkTree {
    nodes: BTreeMap<ChunkName, ChunkNode>,
}

impl ChunkTree {
    /// Build the tree from the complete set of chunk names
    pub fn new(names: impl IntoIterator<Item = ChunkName>) -> Self {
        let known: BTreeSet<ChunkName> = names.into_iter().collect();

        let mut nodes: BTreeMap<ChunkName, ChunkNode> = known
            .iter()
            .map(|name| {
                let node = ChunkNode {
                    parent: find_ancestors(name, &known).pop(),
                    children: BTreeSet::new(),
                };
                (name.clone(), node)
            })
            .collect();

        let links: Vec<(ChunkName, ChunkName)> = nodes
            .iter()
            .filter_map(|(name, node)| node.parent.clone().map(|parent| (parent, name.clone())))
            .collect();

        for (parent, child) in links {
            if let Some(node) = nodes.get_mut(&parent) {
                node.children.insert(child);
            }
        }

        Self { nodes }
    }

    /// Nearest existing ancestor
    pub fn parent(&self, name: &ChunkName) -> Option<&ChunkName> {
        self.nodes.get(name).and_then(|node| node.parent.as_ref())
    }

    /// Direct descendants, in name order
    pub fn children(&self, name: &ChunkName) -> Vec<&ChunkName> {
        self.nodes
            .get(name)
            .map(|node| node.children.iter().collect())
            .unwrap_or_default()
    }

    /// Chunks with no ancestor page
    pub fn roots(&self) -> Vec<&ChunkName> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    /// All existing ancestors of `name`, most distant first
    pub fn ancestors(&self, name: &ChunkName) -> Vec<&ChunkName> {
        let mut chain = Vec::new();
        let mut current = self.parent(name);

        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }

        chain.reverse();
        chain
    }

    #[cfg(test)]
    fn names(&self) -> impl Iterator<Item = &ChunkName> {
        self.nodes.keys()
    }
}
