use insight_files::tree::path::{is_sorted, join_path};
use insight_files::{FileNode, FileRecord, FileTree, NodeUpdate, TreeError, TreeNode};
use proptest::prelude::*;
use std::collections::BTreeSet;

// "data" is used both as a folder and as a file name
const FOLDERS: &[&str] = &["src", "docs", "img", "notes", "data"];
const FILES: &[&str] = &["a.md", "b.md", "chart.png", "data.csv", "readme.txt", "data"];

fn joined_path(folders: &'static [&'static str], files: &'static [&'static str]) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(folders), 0..4),
        prop::sample::select(files),
    )
        .prop_map(|(folders, file)| {
            let mut segments: Vec<&str> = folders;
            segments.push(file);
            segments.join("/")
        })
}

fn path_strategy() -> impl Strategy<Value = String> {
    joined_path(FOLDERS, FILES)
}

/// Paths that can never land on the shared name
fn plain_path_strategy() -> impl Strategy<Value = String> {
    joined_path(&FOLDERS[..4], &FILES[..5])
}

/// A file at `a` and another file below `a/` cannot coexist
fn clashes(a: &str, b: &str) -> bool {
    b.starts_with(&format!("{}/", a)) || a.starts_with(&format!("{}/", b))
}

fn records(paths: impl IntoIterator<Item = String>) -> Vec<FileRecord> {
    paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| FileNode::new(format!("id{}", i), path))
        .collect()
}

/// Unique paths, possibly with file/folder clashes
fn raw_files_strategy() -> impl Strategy<Value = Vec<FileRecord>> {
    prop::collection::vec(path_strategy(), 1..24)
        .prop_map(|paths| records(paths.into_iter().collect::<BTreeSet<String>>()))
}

/// Unique paths with clashing records dropped
fn files_strategy() -> impl Strategy<Value = Vec<FileRecord>> {
    prop::collection::vec(path_strategy(), 1..24).prop_map(|paths| {
        let unique: BTreeSet<String> = paths.into_iter().collect();
        let mut kept: Vec<String> = Vec::new();
        for path in unique {
            if !kept.iter().any(|other| clashes(other, &path)) {
                kept.push(path);
            }
        }
        records(kept)
    })
}

#[derive(Debug, Clone)]
enum Op {
    Move(usize, String),
    Rename(usize, &'static str),
    Add(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), path_strategy()).prop_map(|(i, path)| Op::Move(i, path)),
        (any::<usize>(), prop::sample::select(FILES)).prop_map(|(i, name)| Op::Rename(i, name)),
        path_strategy().prop_map(Op::Add),
    ]
}

fn apply_op(tree: &FileTree, ids: &[String], counter: &mut usize, op: &Op) -> FileTree {
    match op {
        Op::Move(i, path) => tree.move_item(&ids[i % ids.len()], path),
        Op::Rename(i, name) => tree.update_item_by_id(NodeUpdate::new(ids[i % ids.len()].clone()).with_name(*name)),
        Op::Add(path) => {
            *counter += 1;
            tree.add_item(FileNode::new(format!("new{}", counter), path.clone()).into())
        }
    }
}

fn assert_paths_match_position(nodes: &[TreeNode], parent: &str) {
    for node in nodes {
        let expected = join_path(parent, node.name());
        assert_eq!(node.path(), expected, "node {} has a stale path", node.id());
        assert_paths_match_position(node.children(), &expected);
    }
}

fn assert_sorted(nodes: &[TreeNode]) {
    assert!(is_sorted(nodes));
    for node in nodes {
        assert_sorted(node.children());
    }
}

proptest! {
    #[test]
    fn flatten_inverts_build(files in raw_files_strategy()) {
        let has_clash = files
            .iter()
            .any(|a| files.iter().any(|b| clashes(&a.path, &b.path)));
        let tree = match FileTree::build(files.clone()) {
            Ok(tree) => tree,
            Err(TreeError::InvalidPath { reason, .. }) => {
                prop_assert!(has_clash);
                prop_assert_eq!(reason, "file/folder name clash");
                return Ok(());
            }
            Err(other) => return Err(TestCaseError::fail(format!("unexpected error: {}", other))),
        };
        prop_assert!(!has_clash);
        let mut records = tree.flatten();
        records.sort_by(|a, b| a.id.cmp(&b.id));

        let mut expected: Vec<FileRecord> = files
            .into_iter()
            .map(|file| {
                let path = file.path.clone();
                file.with_original_path(path)
            })
            .collect();
        expected.sort_by(|a, b| a.id.cmp(&b.id));

        prop_assert_eq!(records, expected);
    }

    #[test]
    fn mutations_preserve_paths_and_order(
        files in files_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
    ) {
        let mut tree = FileTree::build(files.clone()).unwrap();
        let ids: Vec<String> = files.iter().map(|file| file.id.clone()).collect();
        let mut counter = 0;
        for op in &ops {
            tree = apply_op(&tree, &ids, &mut counter, op);
            assert_paths_match_position(tree.roots(), "");
            assert_sorted(tree.roots());
        }
        let node_ids: BTreeSet<&str> = tree.iter().map(TreeNode::id).collect();
        prop_assert_eq!(node_ids.len(), tree.len());
    }

    #[test]
    fn first_move_anchors_original_path(
        files in files_strategy(),
        pick in any::<usize>(),
        first in plain_path_strategy(),
        second in plain_path_strategy(),
    ) {
        let tree = FileTree::build(files.clone()).unwrap();
        let target = &files[pick % files.len()];
        let moved = tree.move_item(&target.id, &first).move_item(&target.id, &second);
        let node = moved.get_file_by_id(&target.id).unwrap();
        prop_assert_eq!(node.original_path(), Some(target.path.as_str()));
        prop_assert_eq!(node.path(), second.as_str());
    }

    #[test]
    fn folder_rename_rewrites_descendants_only(files in files_strategy()) {
        let tree = FileTree::build(files).unwrap();
        let folder = tree.roots().iter().find(|node| node.is_folder()).cloned();
        if let Some(folder) = folder {
            let renamed = tree.update_item_by_id(NodeUpdate::new(folder.id()).with_name("renamed"));
            let prefix = format!("{}/", folder.name());
            for node in tree.iter().filter(|node| node.path().starts_with(&prefix)) {
                let after = renamed.get_file_by_id(node.id()).unwrap();
                prop_assert_eq!(after.name(), node.name());
                prop_assert_eq!(after.path(), format!("renamed/{}", &node.path()[prefix.len()..]));
            }
        }
    }

    #[test]
    fn placeholders_never_flatten(files in files_strategy(), pick in any::<usize>()) {
        let tree = FileTree::build(files.clone()).unwrap();
        let before = tree.flatten().len();
        let parent = tree
            .iter()
            .filter(|node| node.is_folder())
            .map(|node| node.path().to_string())
            .nth(pick % 4)
            .unwrap_or_default();
        let placeholder = FileNode::placeholder(&parent);
        let id = placeholder.id.clone();
        let tree = tree.add_item(placeholder.into());

        prop_assert!(tree.get_file_by_id(&id).is_some());
        prop_assert_eq!(tree.flatten().len(), before);
    }
}
