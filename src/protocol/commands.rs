//! Module `commands`
//!
//! Defines the shell command language: the parsed `Command` enum, the
//! outcome of dispatching one, and the tokenizer that builds commands from
//! raw input lines.

use crate::auth::PromptRequest;
use crate::error::FsError;

/// A shell command parsed from one input line.
///
/// Commands that take arguments carry them as owned strings. Content given
/// inline on the command line is one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir {
        path: String,
        content: Option<String>,
    },
    Ls(Option<String>),
    Cat(String),
    Cd(String),
    Pwd,
    Rename {
        src: String,
        name: String,
    },
    Mv {
        src: String,
        dst: String,
    },
    Cp {
        src: String,
        dst: String,
    },
    Rm(String),
    Edit {
        path: String,
        line: usize,
        text: String,
    },
    Write {
        path: String,
        content: Option<String>,
    },
    Fragment(String),
    Search {
        folder: Option<String>,
        extension: String,
    },
    Save,
    Clear,
    Help,
    Exit,
    /// A command name the shell does not know.
    Unknown(String),
}

impl Command {
    /// Commands whose success changes the tree or the current position.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Mkdir { .. }
                | Command::Cd(_)
                | Command::Rename { .. }
                | Command::Mv { .. }
                | Command::Cp { .. }
                | Command::Rm(_)
                | Command::Edit { .. }
                | Command::Write { .. }
                | Command::Fragment(_)
        )
    }
}

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Carries the stable error kind label.
    Failure(String),
    /// The command stopped before mutating anything; answer the request and
    /// run it again.
    NeedsInput(PromptRequest),
    Exit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn silent() -> Self {
        Self {
            status: CommandStatus::Success,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

fn rest(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

/// Parses a raw input line into a `Command`.
///
/// Arguments are split on whitespace and the command name is matched
/// case-insensitively. A known command with the wrong number or shape of
/// arguments is a `MalformedCommand` error.
pub fn parse_command(raw: &str) -> Result<Command, FsError> {
    let mut tokens = raw.split_whitespace();
    let name = match tokens.next() {
        Some(name) => name.to_ascii_lowercase(),
        None => return Err(FsError::malformed("empty command")),
    };
    let args: Vec<&str> = tokens.collect();

    let command = match (name.as_str(), args.as_slice()) {
        ("mkdir", [path, content @ ..]) => Command::Mkdir {
            path: path.to_string(),
            content: rest(content),
        },
        ("ls", []) => Command::Ls(None),
        ("ls", [path]) => Command::Ls(Some(path.to_string())),
        ("cat", [path]) => Command::Cat(path.to_string()),
        ("cd", [path]) => Command::Cd(path.to_string()),
        ("pwd", []) => Command::Pwd,
        ("rename", [src, name]) => Command::Rename {
            src: src.to_string(),
            name: name.to_string(),
        },
        ("mv", [src, dst]) => Command::Mv {
            src: src.to_string(),
            dst: dst.to_string(),
        },
        ("cp", [src, dst]) => Command::Cp {
            src: src.to_string(),
            dst: dst.to_string(),
        },
        ("rm", [path]) => Command::Rm(path.to_string()),
        ("edit", [path, line, text @ ..]) => {
            let line = line
                .parse::<usize>()
                .map_err(|_| FsError::malformed(format!("'{}' is not a line number", line)))?;
            Command::Edit {
                path: path.to_string(),
                line,
                text: text.join(" "),
            }
        }
        ("write", [path, content @ ..]) => Command::Write {
            path: path.to_string(),
            content: rest(content),
        },
        ("fragment", [path]) => Command::Fragment(path.to_string()),
        ("search", [extension]) => Command::Search {
            folder: None,
            extension: extension.to_string(),
        },
        ("search", [folder, extension]) => Command::Search {
            folder: Some(folder.to_string()),
            extension: extension.to_string(),
        },
        ("save", []) => Command::Save,
        ("clear", []) => Command::Clear,
        ("help", []) => Command::Help,
        ("exit" | "quit" | "q", []) => Command::Exit,
        (
            "mkdir" | "ls" | "cat" | "cd" | "pwd" | "rename" | "mv" | "cp" | "rm" | "edit"
            | "write" | "fragment" | "search" | "save" | "clear" | "help" | "exit" | "quit"
            | "q",
            _,
        ) => return Err(FsError::malformed(usage(&name))),
        _ => Command::Unknown(name),
    };
    Ok(command)
}

/// Argument shape of a known command, for malformed-command messages.
pub fn usage(name: &str) -> String {
    let shape = match name {
        "mkdir" => "mkdir <path> [content...]",
        "ls" => "ls [path]",
        "cat" => "cat <path>",
        "cd" => "cd <path>",
        "pwd" => "pwd",
        "rename" => "rename <path> <new-name>",
        "mv" => "mv <src> <dst>",
        "cp" => "cp <src> <dst>",
        "rm" => "rm <path>",
        "edit" => "edit <path> <line> [text...]",
        "write" => "write <path> [content...]",
        "fragment" => "fragment <path>",
        "search" => "search [folder] <ext>",
        "save" => "save",
        "clear" => "clear",
        "help" => "help",
        _ => "exit",
    };
    format!("usage: {}", shape)
}
