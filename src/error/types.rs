//! Error types
//!
//! Defines domain-specific error types for the namespace core, the state
//! store, and the interactive shell that wraps both.

use std::io;
use thiserror::Error;

use crate::auth::PromptRequest;

/// Namespace operation errors.
///
/// Every variant is recoverable: an operation that returns one of these has
/// left the tree and the current position exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// A non-terminal segment is missing or is not a folder.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The terminal segment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a folder: {0}")]
    NotAFolder(String),

    /// Password mismatch on a guarded node.
    #[error("Access denied: {0}")]
    Unauthorized(String),

    #[error("Name already in use: {0}")]
    NameCollision(String),

    /// Line index outside the file's bounds.
    #[error("Line {index} is out of range (file has {len} lines)")]
    OutOfRange { index: usize, len: usize },

    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    /// The operation needs a reply from the prompt provider that was not
    /// available. Nothing has been mutated.
    #[error("Input required: {0}")]
    InputRequired(PromptRequest),
}

impl FsError {
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn unauthorized(path: impl Into<String>) -> Self {
        Self::Unauthorized(path.into())
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedCommand(detail.into())
    }
}

/// State file errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("State file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The persisted root record is not a folder.
    #[error("Persisted root is not a folder")]
    InvalidRoot,
}

/// General shell error that encompasses all error types
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
