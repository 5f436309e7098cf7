//! File and folder node types

use crate::tree::path::join_path;
use crate::types::{generate_node_id, NodeId};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Pending change of a node relative to its persisted baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// Created in the editor, no baseline
    Add,
    /// Contents changed
    Modify,
    /// Marked for removal
    Delete,
    /// Path changed through a move or rename
    Rename,
}

/// File node representation
///
/// Doubles as the flat record exchanged with the content loader and saver,
/// see [`FileRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub path: String,
    /// Path the file had in the persisted baseline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<FileAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

/// Flat file record, as loaded from and saved to the content service
pub type FileRecord = FileNode;

impl FileNode {
    /// Create a file whose name is the last segment of `path`
    pub fn new(id: impl Into<NodeId>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: id.into(),
            name: last_segment(&path).to_string(),
            path,
            ..Self::default()
        }
    }

    /// Unnamed file being created under `parent_path` (empty for root)
    pub fn placeholder(parent_path: &str) -> Self {
        Self {
            id: generate_node_id(),
            name: String::new(),
            path: join_path(parent_path, ""),
            action: Some(FileAction::Add),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: FileAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_original_path(mut self, original_path: impl Into<String>) -> Self {
        self.original_path = Some(original_path.into());
        self
    }
}

/// Folder node representation
///
/// Children are shared between tree snapshots until one of them is changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<FileAction>,
    #[serde(default)]
    pub children: Arc<Vec<TreeNode>>,
}

impl FolderNode {
    /// Create an empty folder whose name is the last segment of `path`
    pub fn new(id: impl Into<NodeId>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: id.into(),
            name: last_segment(&path).to_string(),
            path,
            ..Self::default()
        }
    }

    /// Unnamed folder being created under `parent_path` (empty for root)
    pub fn placeholder(parent_path: &str) -> Self {
        Self {
            id: generate_node_id(),
            name: String::new(),
            path: join_path(parent_path, ""),
            action: Some(FileAction::Add),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Arc::new(children);
        self
    }

    pub fn with_action(mut self, action: FileAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// A file or folder in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File(FileNode),
    Folder(FolderNode),
}

impl TreeNode {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.id,
            TreeNode::Folder(folder) => &folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.name,
            TreeNode::Folder(folder) => &folder.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.path,
            TreeNode::Folder(folder) => &folder.path,
        }
    }

    pub fn original_path(&self) -> Option<&str> {
        match self {
            TreeNode::File(file) => file.original_path.as_deref(),
            TreeNode::Folder(folder) => folder.original_path.as_deref(),
        }
    }

    pub fn action(&self) -> Option<FileAction> {
        match self {
            TreeNode::File(file) => file.action,
            TreeNode::Folder(folder) => folder.action,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Transient node the user has not named yet
    pub fn is_placeholder(&self) -> bool {
        self.name().is_empty()
    }

    /// Children of a folder; empty for files
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::File(_) => &[],
            TreeNode::Folder(folder) => &folder.children,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            TreeNode::File(file) => Some(file),
            TreeNode::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            TreeNode::File(_) => None,
            TreeNode::Folder(folder) => Some(folder),
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            TreeNode::File(file) => file.name = name,
            TreeNode::Folder(folder) => folder.name = name,
        }
    }

    pub(crate) fn set_path(&mut self, path: String) {
        match self {
            TreeNode::File(file) => file.path = path,
            TreeNode::Folder(folder) => folder.path = path,
        }
    }

    pub(crate) fn set_action(&mut self, action: Option<FileAction>) {
        match self {
            TreeNode::File(file) => file.action = action,
            TreeNode::Folder(folder) => folder.action = action,
        }
    }

    /// Anchor the original path unless an earlier move already did
    pub(crate) fn anchor_original_path(&mut self, path: &str) {
        let slot = match self {
            TreeNode::File(file) => &mut file.original_path,
            TreeNode::Folder(folder) => &mut folder.original_path,
        };
        if slot.is_none() {
            *slot = Some(path.to_string());
        }
    }
}

impl From<FileNode> for TreeNode {
    fn from(file: FileNode) -> Self {
        TreeNode::File(file)
    }
}

impl From<FolderNode> for TreeNode {
    fn from(folder: FolderNode) -> Self {
        TreeNode::Folder(folder)
    }
}

/// Partial update addressed to a node by id
///
/// `None` leaves a field untouched. For `action`, `Some(None)` clears the
/// pending change (JSON `null`), which is how a delete gets undone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub action: Option<Option<FileAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

impl NodeUpdate {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_action(mut self, action: FileAction) -> Self {
        self.action = Some(Some(action));
        self
    }

    pub fn clear_action(mut self) -> Self {
        self.action = Some(None);
        self
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub(crate) fn marks_deleted(&self) -> bool {
        self.action == Some(Some(FileAction::Delete))
    }
}

// A present key, even `null`, becomes `Some(..)`; an absent key stays `None` via `default`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
