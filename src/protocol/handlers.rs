//! Command handlers module for the VFS shell.
//!
//! Dispatches parsed commands to the namespace operations and turns their
//! results and errors into `CommandResult`s for the console.

use log::{error, info};

use crate::auth::{AccessGuard, Prompt};
use crate::config::ShellConfig;
use crate::error::FsError;
use crate::error::handlers::error_kind;
use crate::filesystem::FileSystem;
use crate::navigate::{change_directory, print_working_directory};
use crate::persistence::StateStore;
use crate::protocol::responses::{
    ALREADY_AT_ROOT, HELP_TEXT, NO_MATCHES, format_listing, kind_label,
};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::storage::{self, Content};

/// Everything a command runs against.
pub struct Session<'a> {
    pub fs: &'a mut FileSystem,
    pub store: &'a StateStore,
    pub config: &'a ShellConfig,
}

/// Dispatches a parsed command to its handler.
///
/// Prompts go through `prompt`. When it runs out of replies the result is
/// `NeedsInput` and nothing has changed.
pub fn handle_command(
    session: &mut Session<'_>,
    prompt: &mut dyn Prompt,
    command: &Command,
) -> CommandResult {
    let mut guard = AccessGuard::new(prompt);
    let outcome = match command {
        Command::Save => return handle_cmd_save(session),
        Command::Clear => return handle_cmd_clear(session),
        Command::Exit => return handle_cmd_exit(session),
        Command::Help => Ok(CommandResult::success(HELP_TEXT)),
        Command::Pwd => Ok(CommandResult::success(print_working_directory(session.fs))),
        Command::Unknown(name) => {
            return CommandResult {
                status: CommandStatus::Failure("CommandNotFound".into()),
                message: Some(format!("Command not found: {}", name)),
            };
        }
        other => run_operation(session, &mut guard, other),
    };

    match outcome {
        Ok(result) => result,
        Err(e) => fs_failure(e),
    }
}

/// Runs a namespace command against the tree.
fn run_operation(
    session: &mut Session<'_>,
    guard: &mut AccessGuard<'_>,
    command: &Command,
) -> Result<CommandResult, FsError> {
    let fs = &mut *session.fs;
    let terminator = session.config.content_terminator.as_str();

    let result = match command {
        Command::Mkdir { path, content } => {
            let content = inline_or_interactive(content);
            let created = storage::create(fs, guard, path, content, terminator)?;
            let verb = if created.replaced { "Replaced" } else { "Created" };
            CommandResult::success(format!(
                "{} {} {}",
                verb,
                kind_label(created.kind),
                created.path
            ))
        }
        Command::Ls(path) => {
            let listing = storage::list_directory(fs, guard, path.as_deref())?;
            match format_listing(&listing.entries) {
                Some(text) => CommandResult::success(text),
                None => CommandResult::silent(),
            }
        }
        Command::Cat(path) => CommandResult::success(storage::read_file(fs, guard, path)?),
        Command::Cd(path) => {
            let moved = change_directory(fs, guard, path)?;
            if moved.already_at_root {
                CommandResult::success(ALREADY_AT_ROOT)
            } else {
                CommandResult::silent()
            }
        }
        Command::Rename { src, name } => {
            let renamed = storage::rename(fs, guard, src, name)?;
            CommandResult::success(format!("Renamed {} to {}", renamed.from, renamed.to))
        }
        Command::Mv { src, dst } => {
            let moved = storage::move_node(fs, guard, src, dst)?;
            CommandResult::success(format!("Moved {} to {}", moved.from, moved.to))
        }
        Command::Cp { src, dst } => {
            let copied = storage::copy_node(fs, guard, src, dst)?;
            CommandResult::success(format!("Copied {} to {}", copied.from, copied.to))
        }
        Command::Rm(path) => {
            let deleted = storage::delete(fs, guard, path)?;
            CommandResult::success(format!(
                "Deleted {} {}",
                kind_label(deleted.kind),
                deleted.path
            ))
        }
        Command::Edit { path, line, text } => {
            storage::edit_line(fs, guard, path, *line, text.clone())?;
            CommandResult::success(format!("Updated line {} of {}", line, path))
        }
        Command::Write { path, content } => {
            let content = inline_or_interactive(content);
            let count = storage::write_file(fs, guard, path, content, terminator)?;
            CommandResult::success(format!("Wrote {} line(s) to {}", count, path))
        }
        Command::Fragment(path) => {
            let removed = storage::fragment(fs, guard, path)?;
            CommandResult::success(format!("Removed {} blank line(s) from {}", removed, path))
        }
        Command::Search { folder, extension } => {
            let found = storage::search(fs, guard, folder.as_deref(), extension)?;
            CommandResult::success(
                format_listing(&found.entries).unwrap_or_else(|| NO_MATCHES.to_string()),
            )
        }
        Command::Pwd
        | Command::Help
        | Command::Save
        | Command::Clear
        | Command::Exit
        | Command::Unknown(_) => CommandResult::silent(),
    };
    Ok(result)
}

fn inline_or_interactive(content: &Option<String>) -> Content {
    match content {
        Some(line) => Content::Inline(vec![line.clone()]),
        None => Content::Interactive,
    }
}

fn fs_failure(e: FsError) -> CommandResult {
    match e {
        FsError::InputRequired(request) => CommandResult {
            status: CommandStatus::NeedsInput(request),
            message: None,
        },
        other => CommandResult {
            status: CommandStatus::Failure(error_kind(&other).to_string()),
            message: Some(other.to_string()),
        },
    }
}

/// Handles `save`: writes the session to the state file.
fn handle_cmd_save(session: &mut Session<'_>) -> CommandResult {
    match session.store.save(session.fs) {
        Ok(()) => CommandResult::success(format!(
            "State saved to {}",
            session.store.path().display()
        )),
        Err(e) => {
            error!("Save failed: {}", e);
            CommandResult {
                status: CommandStatus::Failure("Persistence".into()),
                message: Some(format!("Save failed: {}", e)),
            }
        }
    }
}

/// Handles `clear`: drops the state file and resets to an empty root.
fn handle_cmd_clear(session: &mut Session<'_>) -> CommandResult {
    match session.store.clear() {
        Ok(fresh) => {
            *session.fs = fresh;
            info!("Session cleared");
            CommandResult::success("State cleared")
        }
        Err(e) => {
            error!("Clear failed: {}", e);
            CommandResult {
                status: CommandStatus::Failure("Persistence".into()),
                message: Some(format!("Clear failed: {}", e)),
            }
        }
    }
}

/// Handles `exit`: saves, then signals the shell to stop.
fn handle_cmd_exit(session: &mut Session<'_>) -> CommandResult {
    let message = match session.store.save(session.fs) {
        Ok(()) => "Goodbye".to_string(),
        Err(e) => {
            error!("Save on exit failed: {}", e);
            format!("Save failed: {}. Goodbye", e)
        }
    };
    CommandResult {
        status: CommandStatus::Exit,
        message: Some(message),
    }
}
