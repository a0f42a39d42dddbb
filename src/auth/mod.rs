//! Access control
//!
//! Handles password checks on protected nodes and the prompt provider the
//! checks draw their credentials from.

pub mod guard;
pub mod prompt;

pub use guard::{AccessGuard, validate_password};
pub use prompt::{Prompt, PromptRequest, ScriptedPrompt};
