//! Error handling
//!
//! Defines error types and handling for the namespace and the shell.

pub mod handlers;
pub mod types;

pub use types::*;
