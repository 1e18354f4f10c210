//! Error types for documents

use thiserror::Error;

/// Structural failures of a single tree operation.
///
/// These never leave the tree half-modified: each operation checks its
/// targets before touching anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Block not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Duplicate block id: {0}")]
    DuplicateId(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}
