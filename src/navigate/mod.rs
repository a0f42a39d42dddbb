//! Navigate module
//!
//! Handles path parsing and resolution against the session tree, and the
//! directory navigation operations built on them.

mod operations;
pub mod path;
pub mod resolver;
mod results;

// Re-export public types and functions
pub use operations::{change_directory, print_working_directory};
pub use resolver::{CreatePlan, EntryTarget, FolderTarget};
pub use results::CdResult;
