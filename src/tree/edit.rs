//! Serializable edits and strict replay
//!
//! The plain mutators treat a missing target as a no-op. Replaying a [`TreeEdit`]
//! reports it instead, so a session or a batch of edits can tell them apart.

use crate::error::TreeError;
use crate::tree::node::{NodeUpdate, TreeNode};
use crate::tree::FileTree;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One user-driven change to the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TreeEdit {
    /// Upload, create, or replace a node at its path
    Add { node: TreeNode },
    /// Drop the node currently at `path`
    Remove { path: String },
    /// Drag and drop, or any other relocation
    #[serde(rename_all = "camelCase")]
    Move { id: String, new_path: String },
    /// Rename, delete, undelete, or change payload fields
    Update(NodeUpdate),
}

impl TreeEdit {
    /// Short label for logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            TreeEdit::Add { .. } => "add",
            TreeEdit::Remove { .. } => "remove",
            TreeEdit::Move { .. } => "move",
            TreeEdit::Update(_) => "update",
        }
    }
}

impl FileTree {
    /// Replay an edit, failing with [`TreeError::NotFound`] when its target is absent
    pub fn apply(&self, edit: &TreeEdit) -> Result<FileTree, TreeError> {
        debug!(op = edit.kind(), "Applying edit");
        match edit {
            TreeEdit::Add { node } => Ok(self.add_item(node.clone())),
            TreeEdit::Remove { path } => {
                let node = self
                    .node_at_path(path)
                    .ok_or_else(|| TreeError::NotFound(path.clone()))?;
                Ok(self.remove_item(node))
            }
            TreeEdit::Move { id, new_path } => {
                if self.get_file_by_id(id).is_none() {
                    return Err(TreeError::NotFound(id.clone()));
                }
                Ok(self.move_item(id, new_path))
            }
            TreeEdit::Update(update) => {
                if self.get_file_by_id(&update.id).is_none() {
                    return Err(TreeError::NotFound(update.id.clone()));
                }
                Ok(self.update_item_by_id(update.clone()))
            }
        }
    }

    /// Replay edits in order, stopping at the first one whose target is absent
    pub fn apply_all<'a, I>(&self, edits: I) -> Result<FileTree, TreeError>
    where
        I: IntoIterator<Item = &'a TreeEdit>,
    {
        edits
            .into_iter()
            .try_fold(self.clone(), |tree, edit| tree.apply(edit))
    }
}
