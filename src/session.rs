//! Editor session: the single writer around the current tree snapshot
//!
//! A tree snapshot is an immutable value, so readers simply clone the current one.
//! Writers go through the session, which serializes the read-compute-publish
//! sequence behind a write lock and keeps previous snapshots for undo.

use crate::config::{SessionConfig, TreeConfig};
use crate::error::TreeError;
use crate::tree::{FileRecord, FileTree, TreeBuilder, TreeEdit};
use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::{debug, info};

struct SessionState {
    current: FileTree,
    undo: VecDeque<FileTree>,
    redo: Vec<FileTree>,
}

/// Shared editing session over one content item's files
pub struct EditorSession {
    state: RwLock<SessionState>,
    builder: TreeBuilder,
    config: SessionConfig,
}

impl EditorSession {
    /// Start a session from an already built tree with default settings
    pub fn new(tree: FileTree) -> Self {
        Self::with_config(tree, TreeBuilder::new(), SessionConfig::default())
    }

    fn with_config(tree: FileTree, builder: TreeBuilder, config: SessionConfig) -> Self {
        Self {
            state: RwLock::new(SessionState {
                current: tree,
                undo: VecDeque::new(),
                redo: Vec::new(),
            }),
            builder,
            config,
        }
    }

    /// Build the baseline tree from persisted records and start a session on it
    pub fn open(
        files: Vec<FileRecord>,
        tree_config: &TreeConfig,
        config: SessionConfig,
    ) -> Result<Self, TreeError> {
        let builder = TreeBuilder::with_policy(tree_config.path_policy);
        let tree = builder.build(files)?;
        info!(nodes = tree.len(), "Opened editor session");
        Ok(Self::with_config(tree, builder, config))
    }

    /// Current snapshot
    pub fn snapshot(&self) -> FileTree {
        self.state.read().current.clone()
    }

    /// Replay one edit strictly; nothing is published when its target is missing
    pub fn apply(&self, edit: &TreeEdit) -> Result<FileTree, TreeError> {
        let mut state = self.state.write();
        let next = state.current.apply(edit)?;
        self.publish(&mut state, next.clone());
        Ok(next)
    }

    /// Compute and publish the next snapshot from the current one
    ///
    /// `f` runs under the write lock, so concurrent calls are applied one at a time.
    pub fn update<F>(&self, f: F) -> FileTree
    where
        F: FnOnce(&FileTree) -> FileTree,
    {
        let mut state = self.state.write();
        let next = f(&state.current);
        self.publish(&mut state, next.clone());
        next
    }

    /// Step back to the previous snapshot; false when there is none
    pub fn undo(&self) -> bool {
        let mut state = self.state.write();
        match state.undo.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut state.current, previous);
                state.redo.push(current);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone snapshot; false when there is none
    pub fn redo(&self) -> bool {
        let mut state = self.state.write();
        match state.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut state.current, next);
                state.undo.push_back(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.state.read().undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.read().redo.is_empty()
    }

    /// Flatten the current snapshot for saving and start over from it as the new baseline
    ///
    /// The returned records carry pending actions and original paths. The new
    /// baseline drops deleted files, clears actions, and re-anchors original paths;
    /// undo history is discarded.
    pub fn commit(&self) -> Result<Vec<FileRecord>, TreeError> {
        let mut state = self.state.write();
        let records = state.current.flatten();

        let baseline: Vec<FileRecord> = records
            .iter()
            .filter(|record| record.action != Some(crate::tree::FileAction::Delete))
            .cloned()
            .map(|mut record| {
                record.action = None;
                record.original_path = None;
                record
            })
            .collect();
        let tree = self.builder.build(baseline)?;

        state.current = tree;
        state.undo.clear();
        state.redo.clear();
        info!(records = records.len(), "Committed editor session");
        Ok(records)
    }

    fn publish(&self, state: &mut SessionState, next: FileTree) {
        if next == state.current {
            debug!("Edit left the tree unchanged, history not extended");
            return;
        }
        let previous = std::mem::replace(&mut state.current, next);
        if self.config.history_limit > 0 {
            state.undo.push_back(previous);
            while state.undo.len() > self.config.history_limit {
                state.undo.pop_front();
            }
        }
        state.redo.clear();
    }
}
