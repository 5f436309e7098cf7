//! Format trees and flattened records as text.

use crate::tree::{FileAction, FileRecord, FileTree, TreeNode};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn action_label(action: Option<FileAction>) -> &'static str {
    match action {
        None => "-",
        Some(FileAction::Add) => "add",
        Some(FileAction::Modify) => "modify",
        Some(FileAction::Delete) => "delete",
        Some(FileAction::Rename) => "rename",
    }
}

/// Format the tree as an indented outline, one node per line.
pub fn format_tree_text(tree: &FileTree) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("File tree")));
    if tree.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }
    write_level(&mut out, tree.roots(), 1);
    out.push_str(&format!(
        "\n  {} nodes, {} files\n",
        tree.len(),
        tree.file_count()
    ));
    out
}

fn write_level(out: &mut String, nodes: &[TreeNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        let name = if node.is_placeholder() {
            "<unnamed>".to_string()
        } else {
            node.name().to_string()
        };
        let label = match node {
            TreeNode::Folder(_) => format!("{}/", name.bold()),
            TreeNode::File(_) => name,
        };
        match node.action() {
            Some(action) => out.push_str(&format!(
                "{}{} [{}]\n",
                indent,
                label,
                action_label(Some(action)).yellow()
            )),
            None => out.push_str(&format!("{}{}\n", indent, label)),
        }
        write_level(out, node.children(), depth + 1);
    }
}

/// Format flattened records as a table.
pub fn format_records_text(records: &[FileRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Files")));
    if records.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Id", "Action", "Original path"]);
    for record in records {
        table.add_row(vec![
            record.path.clone(),
            record.id.clone(),
            action_label(record.action).to_string(),
            record.original_path.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Format a single resolved node.
pub fn format_node_text(node: &TreeNode) -> String {
    let kind = if node.is_folder() { "folder" } else { "file" };
    let mut out = String::new();
    out.push_str(&format!("  Id: {}\n", node.id()));
    out.push_str(&format!("  Kind: {}\n", kind));
    out.push_str(&format!("  Name: {}\n", node.name()));
    out.push_str(&format!("  Path: {}\n", node.path()));
    out.push_str(&format!(
        "  Original path: {}\n",
        node.original_path().unwrap_or("-")
    ));
    out.push_str(&format!("  Action: {}\n", action_label(node.action())));
    if let TreeNode::Folder(folder) = node {
        out.push_str(&format!("  Children: {}\n", folder.children.len()));
    }
    out
}
