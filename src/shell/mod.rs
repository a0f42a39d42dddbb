//! Interactive shell
//!
//! The async read-eval-print loop around the command dispatcher.

pub mod console;
pub mod core;

pub use console::Console;
pub use core::Shell;
