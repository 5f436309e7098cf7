//! Core types shared across the file tree model.

/// NodeId: stable identifier of a file or folder, unique within one tree
pub type NodeId = String;

/// Generate a fresh id for a node the tree creates on its own (implicit folders)
pub fn generate_node_id() -> NodeId {
    uuid::Uuid::new_v4().to_string()
}
