//! Prompt provider
//!
//! Operations never read the console themselves. When they need a password
//! or file content they ask a [`Prompt`], which the interactive shell and the
//! tests supply in different ways.

use std::collections::VecDeque;
use std::fmt;

use crate::error::FsError;

/// A piece of input an operation needs before it can proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    /// Credential for an existing protected node.
    Password { path: String },
    /// Password to set on a node being created; empty means none.
    NewPassword { path: String },
    /// File content, one reply per line, ended by `terminator`.
    Content { path: String, terminator: String },
}

impl PromptRequest {
    pub fn path(&self) -> &str {
        match self {
            PromptRequest::Password { path }
            | PromptRequest::NewPassword { path }
            | PromptRequest::Content { path, .. } => path,
        }
    }

    /// Whether the reply spans several lines.
    pub fn is_multiline(&self) -> bool {
        matches!(self, PromptRequest::Content { .. })
    }

    pub fn terminator(&self) -> Option<&str> {
        match self {
            PromptRequest::Content { terminator, .. } => Some(terminator),
            _ => None,
        }
    }
}

impl fmt::Display for PromptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptRequest::Password { path } => write!(f, "Password for {}", path),
            PromptRequest::NewPassword { path } => {
                write!(f, "Set password for {} (empty for none)", path)
            }
            PromptRequest::Content { path, terminator } => {
                write!(f, "Content for {} (end with {})", path, terminator)
            }
        }
    }
}

/// Source of replies to [`PromptRequest`]s.
pub trait Prompt {
    /// Returns a single-line reply.
    fn line(&mut self, request: &PromptRequest) -> Result<String, FsError>;

    /// Returns content lines up to, not including, the request's terminator.
    fn lines(&mut self, request: &PromptRequest) -> Result<Vec<String>, FsError>;
}

/// Serves replies from a fixed queue.
///
/// When the queue runs dry the request is reported back as
/// [`FsError::InputRequired`], which lets an asynchronous caller collect the
/// reply and run the operation again with a longer queue.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    replies: VecDeque<String>,
    asked: Vec<PromptRequest>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Every request made so far, in order.
    pub fn asked(&self) -> &[PromptRequest] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn line(&mut self, request: &PromptRequest) -> Result<String, FsError> {
        self.asked.push(request.clone());
        self.replies
            .pop_front()
            .ok_or_else(|| FsError::InputRequired(request.clone()))
    }

    fn lines(&mut self, request: &PromptRequest) -> Result<Vec<String>, FsError> {
        self.asked.push(request.clone());
        let terminator = request.terminator().unwrap_or_default();
        let mut collected = Vec::new();
        while let Some(reply) = self.replies.pop_front() {
            if reply == terminator {
                return Ok(collected);
            }
            collected.push(reply);
        }
        Err(FsError::InputRequired(request.clone()))
    }
}
