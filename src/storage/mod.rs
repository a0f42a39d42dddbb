//! Namespace storage operations
//!
//! Handles creation, listing, reading, relocation, deletion and line edits
//! on the in-memory tree.

pub mod operations;
pub mod results;

// Re-export commonly used operations
pub use operations::{
    Content, copy_node, create, delete, edit_line, fragment, list_directory, move_node,
    read_file, rename, search, write_file,
};
pub use results::{CreateResult, DeleteResult, ListResult, RelocateResult};
