//! Copy-on-write tree mutations
//!
//! Each operation leaves the receiver untouched and returns the next snapshot.
//! Only the sibling lists on the path to the change are copied; a missing
//! target produces a snapshot equal to the receiver and a debug log line.

use crate::tree::node::{FileAction, FolderNode, NodeUpdate, TreeNode};
use crate::tree::path::{join_path, sort_nodes, split_parent};
use crate::tree::FileTree;
use crate::types::generate_node_id;
use std::sync::Arc;
use tracing::{debug, warn};

/// Origin of a folder created on the way down to an inserted node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FolderOrigin {
    /// Inferred from persisted paths, anchored to its path
    Baseline,
    /// Created by an edit, no baseline
    Edit,
}

impl FileTree {
    /// Insert a node at the location implied by its path
    ///
    /// Missing folders along the way are created. An existing node with the same
    /// name at the final level absorbs the incoming one instead of being duplicated:
    /// fields the incoming node sets win, fields it leaves unset are kept, and an
    /// incoming folder without children keeps the existing children.
    ///
    /// A file and a folder never share a name among siblings: if the node would
    /// land on a node of the other kind, or under a file, the tree is unchanged.
    ///
    /// The node is keyed by its `name`; its stored path, and the paths of anything
    /// below it, are rewritten from where it lands.
    pub fn add_item(&self, node: TreeNode) -> FileTree {
        let (parents, _) = split_parent(node.path());
        if name_clash(self.roots(), &parents, node.name(), node.is_folder()) {
            warn!(id = node.id(), path = node.path(), "File/folder name clash, tree unchanged");
            return self.clone();
        }
        self.clone().insert(node, FolderOrigin::Edit)
    }

    /// Remove the node with this node's name and kind at its path
    pub fn remove_item(&self, node: &TreeNode) -> FileTree {
        let (parents, _) = split_parent(node.path());
        let Some(indices) = locate(self.roots(), &parents, node.name(), node.is_folder()) else {
            debug!(path = node.path(), "Remove target not found, tree unchanged");
            return self.clone();
        };
        let mut roots = self.roots.clone();
        if take_at(&mut roots, &indices).is_none() {
            return self.clone();
        }
        FileTree::from_roots(roots)
    }

    /// Relocate the node with `id` to `new_path`
    ///
    /// The first move of a node anchors its original path; the node is marked as
    /// renamed unless it already carries an action. The last segment of `new_path`
    /// becomes the node's name. A destination that clashes with a node of the
    /// other kind leaves the tree unchanged.
    pub fn move_item(&self, id: &str, new_path: &str) -> FileTree {
        let Some(indices) = self.index_path_of(id) else {
            debug!(id, "Move target not found, tree unchanged");
            return self.clone();
        };
        let mut roots = self.roots.clone();
        let Some(mut node) = take_at(&mut roots, &indices) else {
            return self.clone();
        };

        let (parents, name) = split_parent(new_path);
        if name_clash(&roots, &parents, name, node.is_folder()) {
            warn!(id, to = new_path, "File/folder name clash, tree unchanged");
            return self.clone();
        }

        let old_path = node.path().to_string();
        node.anchor_original_path(&old_path);
        node.set_name(name.to_string());
        node.set_path(new_path.to_string());
        if node.action().is_none() {
            node.set_action(Some(FileAction::Rename));
        }
        debug!(id, from = %old_path, to = new_path, "Moving node");

        FileTree::from_roots(roots).insert(node, FolderOrigin::Edit)
    }

    /// Apply a partial update to the node with `update.id`
    ///
    /// A new name recomputes the node's path from its parent and cascades to all
    /// descendants. Marking a folder deleted marks everything inside it deleted.
    pub fn update_item_by_id(&self, update: NodeUpdate) -> FileTree {
        let Some(mut indices) = self.index_path_of(&update.id) else {
            debug!(id = %update.id, "Update target not found, tree unchanged");
            return self.clone();
        };
        let Some(last) = indices.pop() else {
            return self.clone();
        };
        let parent_path = node_at(self.roots(), &indices)
            .map(|parent| parent.path().to_string())
            .unwrap_or_default();

        let mut roots = self.roots.clone();
        let Some(siblings) = siblings_mut(&mut roots, &indices) else {
            return self.clone();
        };
        let Some(node) = siblings.get_mut(last) else {
            return self.clone();
        };
        apply_update(node, &parent_path, update);
        sort_nodes(siblings);
        FileTree::from_roots(roots)
    }

    pub(crate) fn insert(mut self, node: TreeNode, origin: FolderOrigin) -> FileTree {
        let (parents, _) = split_parent(node.path());
        insert_at(&mut self.roots, "", &parents, node, origin);
        self
    }
}

fn insert_at(
    level: &mut Arc<Vec<TreeNode>>,
    parent_path: &str,
    parents: &[String],
    mut node: TreeNode,
    origin: FolderOrigin,
) {
    let nodes = Arc::make_mut(level);
    match parents.split_first() {
        None => {
            let path = join_path(parent_path, node.name());
            node.set_path(path);
            let idx = match nodes.iter().position(|existing| existing.name() == node.name()) {
                Some(idx) => {
                    merge_node(&mut nodes[idx], node);
                    idx
                }
                None => {
                    nodes.push(node);
                    nodes.len() - 1
                }
            };
            rebase_descendants(&mut nodes[idx]);
        }
        Some((segment, rest)) => {
            let folder_path = join_path(parent_path, segment);
            let idx = match nodes
                .iter()
                .position(|existing| existing.is_folder() && existing.name() == segment)
            {
                Some(idx) => idx,
                None => {
                    let mut folder = FolderNode::new(generate_node_id(), folder_path.clone());
                    if origin == FolderOrigin::Baseline {
                        folder.original_path = Some(folder_path.clone());
                    }
                    nodes.push(folder.into());
                    nodes.len() - 1
                }
            };
            if let TreeNode::Folder(folder) = &mut nodes[idx] {
                insert_at(&mut folder.children, &folder_path, rest, node, origin);
            }
        }
    }
    sort_nodes(nodes);
}

fn merge_node(existing: &mut TreeNode, incoming: TreeNode) {
    match (existing, incoming) {
        (TreeNode::File(current), TreeNode::File(file)) => {
            current.id = file.id;
            current.name = file.name;
            current.path = file.path;
            current.original_path = file.original_path.or(current.original_path.take());
            current.action = file.action.or(current.action);
            current.mime_type = file.mime_type.or(current.mime_type.take());
            current.size = file.size.or(current.size);
            current.readonly = file.readonly.or(current.readonly);
            current.contents = file.contents.or(current.contents.take());
        }
        (TreeNode::Folder(current), TreeNode::Folder(folder)) => {
            current.id = folder.id;
            current.name = folder.name;
            current.path = folder.path;
            current.original_path = folder.original_path.or(current.original_path.take());
            current.action = folder.action.or(current.action);
            if !folder.children.is_empty() {
                current.children = folder.children;
            }
        }
        (current, incoming) => {
            warn!(
                existing = current.id(),
                incoming = incoming.id(),
                "File/folder name clash, keeping existing node"
            );
        }
    }
}

fn apply_update(node: &mut TreeNode, parent_path: &str, update: NodeUpdate) {
    let deleting = update.marks_deleted();
    let NodeUpdate {
        name,
        action,
        mime_type,
        size,
        readonly,
        contents,
        ..
    } = update;

    if let Some(name) = name {
        if name != node.name() {
            node.set_path(join_path(parent_path, &name));
            node.set_name(name);
            rebase_descendants(node);
        }
    }
    if deleting {
        if let TreeNode::Folder(folder) = node {
            mark_deleted(&mut folder.children);
        }
    }
    if let Some(action) = action {
        node.set_action(action);
    }
    if let TreeNode::File(file) = node {
        if mime_type.is_some() {
            file.mime_type = mime_type;
        }
        if size.is_some() {
            file.size = size;
        }
        if readonly.is_some() {
            file.readonly = readonly;
        }
        if contents.is_some() {
            file.contents = contents;
        }
    }
}

/// Rewrite the paths below a folder from its own path; names are untouched
fn rebase_descendants(node: &mut TreeNode) {
    if let TreeNode::Folder(folder) = node {
        rebase_children(&mut folder.children, &folder.path);
    }
}

fn rebase_children(children: &mut Arc<Vec<TreeNode>>, parent_path: &str) {
    if paths_consistent(children, parent_path) {
        return;
    }
    for child in Arc::make_mut(children).iter_mut() {
        let path = join_path(parent_path, child.name());
        child.set_path(path);
        if let TreeNode::Folder(folder) = child {
            rebase_children(&mut folder.children, &folder.path);
        }
    }
}

fn paths_consistent(children: &[TreeNode], parent_path: &str) -> bool {
    children.iter().all(|child| {
        child.path() == join_path(parent_path, child.name())
            && paths_consistent(child.children(), child.path())
    })
}

fn mark_deleted(children: &mut Arc<Vec<TreeNode>>) {
    for child in Arc::make_mut(children).iter_mut() {
        child.set_action(Some(FileAction::Delete));
        if let TreeNode::Folder(folder) = child {
            mark_deleted(&mut folder.children);
        }
    }
}

/// Whether placing a node of the given kind at `parents`/`name` would put a file
/// and a folder under the same name, or a node below a file
pub(crate) fn name_clash(level: &[TreeNode], parents: &[String], name: &str, is_folder: bool) -> bool {
    let mut level = level;
    for segment in parents {
        let folder = level
            .iter()
            .find_map(|node| node.as_folder().filter(|folder| folder.name == *segment));
        match folder {
            Some(folder) => level = &folder.children,
            None => return level.iter().any(|node| node.name() == segment),
        }
    }
    level
        .iter()
        .any(|node| node.name() == name && node.is_folder() != is_folder)
}

/// Node reached by following `indices` from the root; `None` for an empty path
fn node_at<'a>(level: &'a [TreeNode], indices: &[usize]) -> Option<&'a TreeNode> {
    let (&last, parents) = indices.split_last()?;
    let mut level = level;
    for &idx in parents {
        level = level.get(idx)?.children();
    }
    level.get(last)
}

/// Index path of the node named `name` (of the given kind) under `parents`
fn locate(
    level: &[TreeNode],
    parents: &[String],
    name: &str,
    is_folder: bool,
) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(parents.len() + 1);
    let mut level = level;
    for segment in parents {
        let idx = level
            .iter()
            .position(|node| node.is_folder() && node.name() == segment)?;
        indices.push(idx);
        level = level[idx].children();
    }
    let idx = level
        .iter()
        .position(|node| node.name() == name && node.is_folder() == is_folder)?;
    indices.push(idx);
    Some(indices)
}

/// Mutable sibling list reached by following `parents` indices from the root
fn siblings_mut<'a>(
    roots: &'a mut Arc<Vec<TreeNode>>,
    parents: &[usize],
) -> Option<&'a mut Vec<TreeNode>> {
    let mut level = Arc::make_mut(roots);
    for &idx in parents {
        level = match level.get_mut(idx) {
            Some(TreeNode::Folder(folder)) => Arc::make_mut(&mut folder.children),
            _ => return None,
        };
    }
    Some(level)
}

fn take_at(roots: &mut Arc<Vec<TreeNode>>, indices: &[usize]) -> Option<TreeNode> {
    let (&last, parents) = indices.split_last()?;
    let siblings = siblings_mut(roots, parents)?;
    if last < siblings.len() {
        Some(siblings.remove(last))
    } else {
        None
    }
}
