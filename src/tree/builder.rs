//! Tree construction from flat file records

use crate::error::TreeError;
use crate::tree::mutate::{name_clash, FolderOrigin};
use crate::tree::node::{FileRecord, TreeNode};
use crate::tree::path::{collapse_path, split_parent, validate_path};
use crate::tree::FileTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How the builder treats malformed baseline records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPolicy {
    /// Reject empty segments, leading or trailing separators, duplicate ids, and
    /// a name used by both a file and a folder
    #[default]
    Strict,
    /// Collapse empty segments and skip records that still cannot be placed
    Collapse,
}

/// Builds a [`FileTree`] from the flat records of a persisted baseline
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    policy: PathPolicy,
}

impl TreeBuilder {
    /// Strict builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Best-effort builder, see [`PathPolicy::Collapse`]
    pub fn lenient() -> Self {
        Self::with_policy(PathPolicy::Collapse)
    }

    pub fn with_policy(policy: PathPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PathPolicy {
        self.policy
    }

    /// Build the tree
    ///
    /// Folders are inferred from path segments. Each file's name is taken from
    /// its last path segment and its original path is anchored to its path
    /// unless the record already carries one.
    pub fn build(&self, files: Vec<FileRecord>) -> Result<FileTree, TreeError> {
        let total = files.len();
        let mut seen = HashSet::with_capacity(total);
        let mut tree = FileTree::new();

        for mut file in files {
            let path = match self.policy {
                PathPolicy::Strict => {
                    validate_path(&file.path)?;
                    file.path.clone()
                }
                PathPolicy::Collapse => {
                    let collapsed = collapse_path(&file.path);
                    if collapsed.is_empty() {
                        warn!(id = %file.id, path = %file.path, "Skipping record without a usable path");
                        continue;
                    }
                    collapsed
                }
            };

            if !seen.insert(file.id.clone()) {
                match self.policy {
                    PathPolicy::Strict => return Err(TreeError::DuplicateId(file.id)),
                    PathPolicy::Collapse => {
                        warn!(id = %file.id, path = %path, "Skipping record with duplicate id");
                        continue;
                    }
                }
            }

            let (parents, name) = split_parent(&path);
            if name_clash(tree.roots(), &parents, name, false) {
                match self.policy {
                    PathPolicy::Strict => {
                        return Err(TreeError::InvalidPath {
                            path,
                            reason: "file/folder name clash".to_string(),
                        })
                    }
                    PathPolicy::Collapse => {
                        warn!(id = %file.id, path = %path, "Skipping record whose name clashes with a folder or file");
                        continue;
                    }
                }
            }
            file.name = name.to_string();
            if file.original_path.is_none() {
                file.original_path = Some(path.clone());
            }
            file.path = path;
            tree = tree.insert(TreeNode::File(file), FolderOrigin::Baseline);
        }

        debug!(
            records = total,
            nodes = tree.len(),
            policy = ?self.policy,
            "Built file tree"
        );
        Ok(tree)
    }
}

/// Build a tree with the strict policy
pub fn build_tree(files: Vec<FileRecord>) -> Result<FileTree, TreeError> {
    TreeBuilder::new().build(files)
}
