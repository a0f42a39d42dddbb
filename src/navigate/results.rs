//! Result types for navigate operations

/// Result of a cd (change directory) operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdResult {
    pub new_path: String,
    /// A `..` was applied at root and ignored.
    pub already_at_root: bool,
}
