//! Configuration options for tree processing.
//!
//! `ProcessOptions` bounds how much of a tree a single `process` call is
//! willing to admit. Both limits only count nodes that pass their gate;
//! pruned subtrees are free.

use serde::{Deserialize, Serialize};

/// Limits applied while processing a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Deepest admitted node allowed, counting the root as depth 0.
    /// `None` means unlimited.
    pub max_depth: Option<usize>,

    /// Maximum number of admitted nodes, root included.
    /// `None` means unlimited.
    pub max_nodes: Option<usize>,
}

impl ProcessOptions {
    /// Create new options with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum admitted depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the maximum number of admitted nodes.
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Remove both limits.
    pub fn unlimited(mut self) -> Self {
        self.max_depth = None;
        self.max_nodes = None;
        self
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> Option<usize> {
        self.max_depth.filter(|&limit| depth > limit)
    }

    pub(crate) fn nodes_exceeded(&self, admitted: usize) -> Option<usize> {
        self.max_nodes.filter(|&limit| admitted > limit)
    }
}
