//! File Tree Model
//!
//! An immutable tree of files and folders for one piece of content being drafted.
//! Every mutation returns a new [`FileTree`]; sibling lists are shared between
//! snapshots and only the lists along the touched path are copied.

pub mod builder;
pub mod edit;
pub mod mutate;
pub mod node;
pub mod path;
pub mod query;

pub use builder::{build_tree, PathPolicy, TreeBuilder};
pub use edit::TreeEdit;
pub use node::{FileAction, FileNode, FileRecord, FolderNode, NodeUpdate, TreeNode};
pub use query::Iter;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of the tree: the sorted root-level nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree {
    roots: Arc<Vec<TreeNode>>,
}

impl FileTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from persisted records with the default strict policy
    pub fn build(files: Vec<FileRecord>) -> Result<Self, crate::error::TreeError> {
        TreeBuilder::new().build(files)
    }

    pub(crate) fn from_roots(roots: Arc<Vec<TreeNode>>) -> Self {
        Self { roots }
    }

    /// Root-level nodes, folders first
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Whether two snapshots share the same root list allocation
    pub fn shares_roots_with(&self, other: &FileTree) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }
}
