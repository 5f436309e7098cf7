//! Slash-delimited path helpers and sibling ordering

use crate::error::TreeError;
use crate::tree::node::TreeNode;
use std::cmp::Ordering;

/// Path separator used by every node path
pub const SEPARATOR: char = '/';

/// Join a parent path and a child name; an empty parent means the root
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, name)
    }
}

/// Split a path into the folder segments leading to it and its final segment
///
/// Empty folder segments are collapsed; the final segment is kept as is, so a
/// placeholder path such as `"docs/"` yields `(["docs"], "")`.
pub fn split_parent(path: &str) -> (Vec<String>, &str) {
    match path.rfind(SEPARATOR) {
        Some(idx) => {
            let parents = path[..idx]
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect();
            (parents, &path[idx + 1..])
        }
        None => (Vec::new(), path),
    }
}

/// Drop empty segments (`"a//b/"` becomes `"a/b"`)
pub fn collapse_path(path: &str) -> String {
    path.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check a baseline path: non-empty, no leading or trailing separator, no empty segment
pub fn validate_path(path: &str) -> Result<(), TreeError> {
    let invalid = |reason: &str| TreeError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    if path.starts_with(SEPARATOR) {
        return Err(invalid("leading separator"));
    }
    if path.ends_with(SEPARATOR) {
        return Err(invalid("trailing separator"));
    }
    if path.split(SEPARATOR).any(str::is_empty) {
        return Err(invalid("empty segment"));
    }
    Ok(())
}

/// Sibling order: folders before files, then by name
pub fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name().cmp(b.name()))
}

pub fn sort_nodes(nodes: &mut [TreeNode]) {
    nodes.sort_by(compare_nodes);
}

pub fn is_sorted(nodes: &[TreeNode]) -> bool {
    nodes
        .windows(2)
        .all(|pair| compare_nodes(&pair[0], &pair[1]) != Ordering::Greater)
}
