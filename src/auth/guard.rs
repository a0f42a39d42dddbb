//! Access guard
//!
//! Checks credentials for protected nodes on behalf of a single operation.
//! Passwords are compared as plain strings: this is a toy gate, not a
//! credential store.

use log::{info, warn};
use std::collections::HashSet;

use super::prompt::{Prompt, PromptRequest};
use crate::error::FsError;
use crate::node::Node;

/// Validates that the supplied password matches the stored one.
pub fn validate_password(path: &str, stored: &str, supplied: &str) -> Result<(), FsError> {
    if stored == supplied {
        Ok(())
    } else {
        Err(FsError::unauthorized(path))
    }
}

/// Per-operation guard.
///
/// A node verified once is not asked for again within the same operation,
/// so a command crossing the same protected folder twice prompts once.
pub struct AccessGuard<'p> {
    prompt: &'p mut dyn Prompt,
    verified: HashSet<String>,
}

impl<'p> AccessGuard<'p> {
    pub fn new(prompt: &'p mut dyn Prompt) -> Self {
        Self {
            prompt,
            verified: HashSet::new(),
        }
    }

    /// Checks the node at `path` protected by `password`.
    pub fn check(&mut self, path: &str, password: Option<&str>) -> Result<(), FsError> {
        let Some(stored) = password else {
            return Ok(());
        };
        if self.verified.contains(path) {
            return Ok(());
        }

        let supplied = self.prompt.line(&PromptRequest::Password {
            path: path.to_string(),
        })?;

        match validate_password(path, stored, &supplied) {
            Ok(()) => {
                info!("Unlocked {}", path);
                self.verified.insert(path.to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Wrong password for {}", path);
                Err(e)
            }
        }
    }

    pub fn check_node(&mut self, path: &str, node: &Node) -> Result<(), FsError> {
        self.check(path, node.password())
    }

    /// Asks for the password of a node about to be created.
    pub fn new_password(&mut self, path: &str) -> Result<Option<String>, FsError> {
        let reply = self.prompt.line(&PromptRequest::NewPassword {
            path: path.to_string(),
        })?;
        Ok(Some(reply).filter(|password| !password.is_empty()))
    }

    /// Collects file content for `path` until `terminator`.
    pub fn content(&mut self, path: &str, terminator: &str) -> Result<Vec<String>, FsError> {
        self.prompt.lines(&PromptRequest::Content {
            path: path.to_string(),
            terminator: terminator.to_string(),
        })
    }
}
