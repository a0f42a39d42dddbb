//! Session state
//!
//! Holds the tree and the current working position.

mod state;

pub use state::FileSystem;
