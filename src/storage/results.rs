//! Storage result types
//!
//! Defines result structures returned by storage operations.

use crate::node::NodeKind;

/// Result of a create operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    pub path: String,
    pub kind: NodeKind,
    /// Intermediate folders made on the way, outermost first.
    pub created_folders: Vec<String>,
    /// An existing node with the same name was overwritten.
    pub replaced: bool,
}

/// Result of a directory listing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResult {
    pub path: String,
    pub entries: Vec<String>,
}

/// Result of a rename, move or copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateResult {
    pub from: String,
    pub to: String,
    pub kind: NodeKind,
}

/// Result of a deletion operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub path: String,
    pub kind: NodeKind,
}
