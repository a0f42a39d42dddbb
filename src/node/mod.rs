//! Node model
//!
//! The tagged union of files and folders that makes up the namespace.

pub mod naming;
mod types;

pub use naming::{NameClass, classify, wants_password};
pub use types::{Contents, File, Folder, Node, NodeKind};
