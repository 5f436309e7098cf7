//! Lookups and flattening
//!
//! All searches are depth-first and linear in the number of nodes, which stays in
//! the tens to low hundreds for a single content item.

use crate::tree::node::{FileRecord, TreeNode};
use crate::tree::path::{join_path, SEPARATOR};
use crate::tree::FileTree;

/// Depth-first, pre-order iterator over every node of a tree
pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, TreeNode>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.stack.last_mut()?.next();
            match next {
                Some(node) => {
                    if let TreeNode::Folder(folder) = node {
                        self.stack.push(folder.children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FileTree {
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.roots().iter()],
        }
    }

    /// Total number of nodes, folders and placeholders included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots().is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.iter().filter(|node| node.is_file()).count()
    }

    /// Find a node anywhere in the tree by id
    pub fn get_file_by_id(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.id() == id)
    }

    /// Find a node by id together with its ancestors
    ///
    /// The returned chain starts with the node itself, followed by its parent,
    /// grandparent and so on up to the root-level ancestor.
    pub fn find_nested_by_id(&self, id: &str) -> Option<Vec<&TreeNode>> {
        let indices = self.index_path_of(id)?;
        let mut chain = Vec::with_capacity(indices.len());
        let mut level = self.roots();
        for idx in indices {
            let node = level.get(idx)?;
            chain.push(node);
            level = node.children();
        }
        chain.reverse();
        Some(chain)
    }

    /// Resolve a slash-delimited path by node names
    ///
    /// Falls back to the node whose original path matches, so references to a
    /// location from before a rename or move still resolve.
    pub fn get_file_by_path(&self, path: &str) -> Option<&TreeNode> {
        self.node_at_path(path)
            .or_else(|| self.iter().find(|node| node.original_path() == Some(path)))
    }

    /// Resolve a path by current names only, without the original-path fallback
    pub fn node_at_path(&self, path: &str) -> Option<&TreeNode> {
        let mut segments = path.split(SEPARATOR).peekable();
        let mut level = self.roots();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                return level.iter().find(|node| node.name() == segment);
            }
            let folder = level
                .iter()
                .find(|node| node.is_folder() && node.name() == segment)?;
            level = folder.children();
        }
        None
    }

    /// Flatten the tree back into file records for persistence
    ///
    /// Paths are recomputed from tree position. Unnamed placeholders, and anything
    /// under an unnamed folder, are left out; folders never appear in the output.
    pub fn flatten(&self) -> Vec<FileRecord> {
        let mut records = Vec::new();
        collect_files(self.roots(), "", &mut records);
        records
    }

    /// Index of the node at each level on the way down to `id`
    pub(crate) fn index_path_of(&self, id: &str) -> Option<Vec<usize>> {
        let mut indices = Vec::new();
        if search_indices(self.roots(), id, &mut indices) {
            Some(indices)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a FileTree {
    type Item = &'a TreeNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn search_indices(level: &[TreeNode], id: &str, indices: &mut Vec<usize>) -> bool {
    for (idx, node) in level.iter().enumerate() {
        indices.push(idx);
        if node.id() == id || search_indices(node.children(), id, indices) {
            return true;
        }
        indices.pop();
    }
    false
}

fn collect_files(level: &[TreeNode], parent_path: &str, records: &mut Vec<FileRecord>) {
    for node in level {
        if node.is_placeholder() {
            continue;
        }
        let path = join_path(parent_path, node.name());
        match node {
            TreeNode::File(file) => {
                let mut record = file.clone();
                record.path = path;
                records.push(record);
            }
            TreeNode::Folder(folder) => collect_files(&folder.children, &path, records),
        }
    }
}
