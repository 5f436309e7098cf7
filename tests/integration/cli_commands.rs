use std::fs;
use std::path::PathBuf;

use insight_files::config::InsightConfig;
use insight_files::tooling::cli::{CliContext, Commands};
use insight_files::{ApiError, FileRecord, PathPolicy, TreeError};
use tempfile::TempDir;

const FILES: &str = r#"[
    { "id": "a", "name": "a.pdf", "path": "a.pdf" },
    { "id": "b", "name": "b.pdf", "path": "b.pdf" },
    { "id": "c", "name": "c.pdf", "path": "subfolder/c.pdf", "mimeType": "application/pdf" }
]"#;

const EDITS: &str = r#"[
    { "op": "update", "id": "c", "name": "c-2.pdf" },
    { "op": "move", "id": "a", "newPath": "archive/a.pdf" },
    { "op": "add", "node": { "type": "file", "id": "n", "name": "new.md", "path": "subfolder/new.md", "action": "add" } }
]"#;

fn write_inputs(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let files = temp_dir.path().join("files.json");
    let edits = temp_dir.path().join("edits.json");
    fs::write(&files, FILES).unwrap();
    fs::write(&edits, EDITS).unwrap();
    (files, edits)
}

#[test]
fn flatten_json_reflects_replayed_edits() {
    let temp_dir = TempDir::new().unwrap();
    let (files, edits) = write_inputs(&temp_dir);
    let cli = CliContext::with_config(InsightConfig::default());

    let output = cli
        .execute(&Commands::Flatten {
            files,
            edits: Some(edits),
            format: "json".to_string(),
        })
        .unwrap();
    let records: Vec<FileRecord> = serde_json::from_str(&output).unwrap();
    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["archive/a.pdf", "subfolder/c-2.pdf", "subfolder/new.md", "b.pdf"]
    );

    let c = records.iter().find(|r| r.id == "c").unwrap();
    assert_eq!(c.original_path.as_deref(), Some("subfolder/c.pdf"));
    assert_eq!(c.mime_type.as_deref(), Some("application/pdf"));
}

#[test]
fn show_text_outlines_the_tree() {
    let temp_dir = TempDir::new().unwrap();
    let (files, _) = write_inputs(&temp_dir);
    let cli = CliContext::with_config(InsightConfig::default());

    let output = cli
        .execute(&Commands::Show {
            files,
            edits: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("subfolder"));
    assert!(output.contains("c.pdf"));
    assert!(output.contains("4 nodes, 3 files"));
}

#[test]
fn lookup_resolves_pre_rename_path() {
    let temp_dir = TempDir::new().unwrap();
    let (files, edits) = write_inputs(&temp_dir);
    let cli = CliContext::with_config(InsightConfig::default());

    let output = cli
        .execute(&Commands::Lookup {
            files: files.clone(),
            edits: Some(edits),
            id: None,
            path: Some("a.pdf".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let node: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(node["id"], "a");
    assert_eq!(node["path"], "archive/a.pdf");
    assert_eq!(node["action"], "rename");

    let missing = cli.execute(&Commands::Lookup {
        files,
        edits: None,
        id: Some("zzz".to_string()),
        path: None,
        format: "text".to_string(),
    });
    assert!(matches!(missing, Err(ApiError::Tree(TreeError::NotFound(_)))));
}

#[test]
fn edit_against_missing_node_fails_the_command() {
    let temp_dir = TempDir::new().unwrap();
    let (files, _) = write_inputs(&temp_dir);
    let edits = temp_dir.path().join("bad_edits.json");
    fs::write(&edits, r#"[{ "op": "remove", "path": "nowhere.md" }]"#).unwrap();
    let cli = CliContext::with_config(InsightConfig::default());

    let result = cli.execute(&Commands::Flatten {
        files,
        edits: Some(edits),
        format: "text".to_string(),
    });
    assert!(matches!(result, Err(ApiError::Tree(TreeError::NotFound(_)))));
}

#[test]
fn config_file_selects_path_policy() {
    let temp_dir = TempDir::new().unwrap();
    let files = temp_dir.path().join("files.json");
    fs::write(&files, r#"[{ "id": "a", "path": "docs//a.md" }]"#).unwrap();

    let strict = CliContext::with_config(InsightConfig::default());
    let result = strict.execute(&Commands::Flatten {
        files: files.clone(),
        edits: None,
        format: "json".to_string(),
    });
    assert!(matches!(
        result,
        Err(ApiError::Tree(TreeError::InvalidPath { .. }))
    ));

    let config_path = temp_dir.path().join("insight.toml");
    fs::write(&config_path, "[tree]\npath_policy = \"collapse\"\n").unwrap();
    let lenient = CliContext::new(Some(config_path)).unwrap();
    assert_eq!(lenient.config().tree.path_policy, PathPolicy::Collapse);

    let output = lenient
        .execute(&Commands::Flatten {
            files,
            edits: None,
            format: "json".to_string(),
        })
        .unwrap();
    let records: Vec<FileRecord> = serde_json::from_str(&output).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "docs/a.md");
    assert_eq!(records[0].name, "a.md");
}
