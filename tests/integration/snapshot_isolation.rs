use insight_files::{FileAction, FileNode, FileTree, NodeUpdate};

fn baseline() -> FileTree {
    FileTree::build(vec![
        FileNode::new("a", "a.md"),
        FileNode::new("b", "docs/b.md"),
        FileNode::new("c", "docs/guides/c.md"),
        FileNode::new("d", "assets/d.png"),
    ])
    .unwrap()
}

#[test]
fn every_mutation_leaves_the_previous_snapshot_intact() {
    let v0 = baseline();
    let copy = v0.clone();

    let v1 = v0.add_item(FileNode::new("e", "docs/e.md").into());
    let b = v1.get_file_by_id("b").unwrap().clone();
    let v2 = v1.remove_item(&b);
    let v3 = v2.move_item("c", "guides/c.md");
    let docs_id = v3.get_file_by_path("docs").unwrap().id().to_string();
    let v4 = v3.update_item_by_id(NodeUpdate::new(docs_id).with_action(FileAction::Delete));

    assert_eq!(v0, copy);
    assert!(v0.get_file_by_id("e").is_none());
    assert!(v1.get_file_by_id("b").is_some());
    assert_eq!(v2.get_file_by_id("c").unwrap().path(), "docs/guides/c.md");
    assert_eq!(v3.get_file_by_id("e").unwrap().action(), None);
    assert_eq!(v4.get_file_by_id("e").unwrap().action(), Some(FileAction::Delete));
}

#[test]
fn unrelated_branches_are_shared_between_snapshots() {
    let v0 = baseline();
    let v1 = v0.update_item_by_id(NodeUpdate::new("c").with_contents("edited"));

    let assets_before = v0.get_file_by_path("assets").unwrap().as_folder().unwrap();
    let assets_after = v1.get_file_by_path("assets").unwrap().as_folder().unwrap();
    assert!(std::sync::Arc::ptr_eq(
        &assets_before.children,
        &assets_after.children
    ));
    assert!(!v0.shares_roots_with(&v1));
}

#[test]
fn snapshots_can_be_read_from_other_threads() {
    let v0 = baseline();
    let v1 = v0.move_item("a", "docs/a.md");
    let handle = std::thread::spawn(move || v0.get_file_by_id("a").map(|n| n.path().to_string()));
    assert_eq!(handle.join().unwrap().as_deref(), Some("a.md"));
    assert_eq!(v1.get_file_by_id("a").unwrap().path(), "docs/a.md");
}
