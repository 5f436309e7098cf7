//! Insight Files: the file tree model behind a multi-file content editor
//!
//! Builds an immutable tree of files and folders from flat, slash-delimited
//! records, applies copy-on-write edits (add, remove, move, rename, delete),
//! and flattens the tree back into records for saving.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, TreeError};
pub use session::EditorSession;
pub use tree::{
    build_tree, FileAction, FileNode, FileRecord, FileTree, FolderNode, NodeUpdate, PathPolicy,
    TreeBuilder, TreeEdit, TreeNode,
};
