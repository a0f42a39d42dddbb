//! Shell core
//!
//! Runs the prompt loop: reads a line, dispatches it, answers any prompts
//! the command raises, and saves at the checkpoints.

use log::{error, info, warn};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, Stdin, Stdout};

use crate::auth::{PromptRequest, ScriptedPrompt};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::filesystem::FileSystem;
use crate::persistence::StateStore;
use crate::protocol::{Command, CommandResult, CommandStatus, Session, handle_command, parse_command};
use crate::shell::console::Console;
use crate::utils::logging::log_command;
use crate::utils::validation::{is_valid_input, sanitize_input};

/// What the next read produced.
enum Input<T> {
    Ready(T),
    Eof,
    Interrupted,
}

/// Whether the loop keeps going after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub struct Shell<R, W> {
    fs: FileSystem,
    store: StateStore,
    config: ShellConfig,
    console: Console<R, W>,
}

impl Shell<BufReader<Stdin>, Stdout> {
    /// Opens the configured state file and attaches to stdin/stdout.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_console(config, Console::stdio())
    }
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn with_console(config: ShellConfig, console: Console<R, W>) -> Self {
        let store = StateStore::new(config.state_path());
        let fs = store.load();
        info!("Shell ready at {}", fs.current_path());
        Self {
            fs,
            store,
            config,
            console,
        }
    }

    pub fn filesystem(&self) -> &FileSystem {
        &self.fs
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Reads and runs commands until `exit`, end of input or Ctrl-C.
    ///
    /// The session is saved before a console error is returned.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        let outcome = self.run_loop().await;
        if let Err(e) = &outcome {
            error!("Shell stopped on error: {}", e);
            self.save_on_exit();
        }
        outcome
    }

    async fn run_loop(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = format!("{} >>> ", self.fs.current_path());
            self.console.write(&prompt).await?;

            let input = tokio::select! {
                line = self.console.read_line() => match line? {
                    Some(line) => Input::Ready(line),
                    None => Input::Eof,
                },
                _ = tokio::signal::ctrl_c() => Input::Interrupted,
            };

            let line = match input {
                Input::Ready(line) => line,
                Input::Eof => {
                    info!("End of input");
                    self.save_on_exit();
                    return Ok(());
                }
                Input::Interrupted => {
                    self.interrupted().await?;
                    return Ok(());
                }
            };

            if self.execute(&line).await? == Flow::Stop {
                return Ok(());
            }
        }
    }

    /// Runs one input line.
    async fn execute(&mut self, raw: &str) -> Result<Flow, ShellError> {
        let line = sanitize_input(raw);
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if !is_valid_input(&line, self.config.max_command_length) {
            warn!("Rejected command line ({} bytes)", line.len());
            self.console
                .write_line(&format!(
                    "Command too long or invalid (limit {} bytes)",
                    self.config.max_command_length
                ))
                .await?;
            return Ok(Flow::Continue);
        }

        log_command(self.fs.current_path(), &line);
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected '{}': {}", line, e);
                self.console.write_line(&e.to_string()).await?;
                return Ok(Flow::Continue);
            }
        };

        let result = match self.dispatch(&command).await? {
            Input::Ready(result) => result,
            Input::Eof => {
                self.console.write_line("Input ended; command cancelled").await?;
                self.save_on_exit();
                return Ok(Flow::Stop);
            }
            Input::Interrupted => {
                self.interrupted().await?;
                return Ok(Flow::Stop);
            }
        };

        if let Some(message) = &result.message {
            self.console.write_line(message).await?;
        }

        match &result.status {
            CommandStatus::Success => {
                if self.config.autosave && command.is_mutating() {
                    self.autosave().await?;
                }
                Ok(Flow::Continue)
            }
            CommandStatus::Failure(kind) => {
                warn!("{:?} failed ({})", command, kind);
                Ok(Flow::Continue)
            }
            CommandStatus::Exit => {
                info!("Exit requested");
                Ok(Flow::Stop)
            }
            CommandStatus::NeedsInput(_) => Ok(Flow::Continue),
        }
    }

    /// Dispatches a command, answering its prompts and running it again
    /// until it no longer needs input.
    async fn dispatch(&mut self, command: &Command) -> Result<Input<CommandResult>, ShellError> {
        let mut replies: Vec<String> = Vec::new();
        loop {
            let mut prompt = ScriptedPrompt::new(replies.iter().cloned());
            let mut session = Session {
                fs: &mut self.fs,
                store: &self.store,
                config: &self.config,
            };
            let result = handle_command(&mut session, &mut prompt, command);

            let pending = match &result.status {
                CommandStatus::NeedsInput(request) => Some(request.clone()),
                _ => None,
            };
            let Some(request) = pending else {
                return Ok(Input::Ready(result));
            };

            match self.ask(&request).await? {
                Input::Ready(answer) => replies.extend(answer),
                Input::Eof => return Ok(Input::Eof),
                Input::Interrupted => return Ok(Input::Interrupted),
            }
        }
    }

    async fn ask(&mut self, request: &PromptRequest) -> Result<Input<Vec<String>>, ShellError> {
        let answer = tokio::select! {
            answer = self.console.answer(request) => match answer? {
                Some(lines) => Input::Ready(lines),
                None => Input::Eof,
            },
            _ = tokio::signal::ctrl_c() => Input::Interrupted,
        };
        Ok(answer)
    }

    async fn autosave(&mut self) -> Result<(), ShellError> {
        if let Err(e) = self.store.save(&self.fs) {
            error!("Autosave failed: {}", e);
            self.console
                .write_line(&format!("Autosave failed: {}", e))
                .await?;
        }
        Ok(())
    }

    async fn interrupted(&mut self) -> Result<(), ShellError> {
        info!("Interrupted; saving state");
        self.save_on_exit();
        self.console.write_line("").await?;
        Ok(())
    }

    fn save_on_exit(&self) {
        if let Err(e) = self.store.save(&self.fs) {
            error!("Failed to save state on exit: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> ShellConfig {
        ShellConfig {
            state_file: dir.path().join("state.json").display().to_string(),
            ..ShellConfig::default()
        }
    }

    fn shell(config: ShellConfig, input: &'static str) -> Shell<&'static [u8], Vec<u8>> {
        Shell::with_console(config, Console::new(input.as_bytes(), Vec::new()))
    }

    fn shell_bytes(config: ShellConfig, input: &'static [u8]) -> Shell<&'static [u8], Vec<u8>> {
        Shell::with_console(config, Console::new(input, Vec::new()))
    }

    fn output<R: AsyncBufRead + Unpin>(shell: &Shell<R, Vec<u8>>) -> String {
        String::from_utf8(shell.console().writer().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_session_runs_and_saves_on_exit() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut sh = shell(config.clone(), "mkdir docs\ncd docs\nmkdir a.txt hi\nls\nexit\n");
        sh.run().await.unwrap();

        let out = output(&sh);
        assert!(out.contains("/docs >>> "));
        assert!(out.contains("a.txt"));
        assert_eq!(sh.filesystem().current_path(), "/docs");

        let restored = StateStore::new(config.state_path()).load();
        assert_eq!(restored.current_path(), "/docs");
    }

    #[tokio::test]
    async fn test_prompts_are_answered_and_retried() {
        let dir = TempDir::new().unwrap();
        let input = "mkdir .vault\npw\nmkdir .vault/n.txt\npw\nline one\nEOF\ncat .vault/n.txt\npw\n";
        let mut sh = shell(config_in(&dir), input);
        sh.run().await.unwrap();

        let out = output(&sh);
        assert!(out.contains("Set password for /.vault (empty for none): "));
        assert!(out.contains("Password for /.vault: "));
        assert!(out.contains("Content for /.vault/n.txt (end with EOF):"));
        assert!(out.contains("line one"));
        let vault = sh.filesystem().root().get(".vault").unwrap();
        assert_eq!(vault.password(), Some("pw"));
    }

    #[tokio::test]
    async fn test_overlong_line_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = ShellConfig {
            max_command_length: 8,
            ..config_in(&dir)
        };
        let mut sh = shell(config, "mkdir abcdefgh\n");
        sh.run().await.unwrap();
        assert!(output(&sh).contains("Command too long"));
        assert!(sh.filesystem().root().is_empty());
    }

    #[tokio::test]
    async fn test_eof_mid_prompt_cancels_command() {
        let dir = TempDir::new().unwrap();
        let mut sh = shell(config_in(&dir), "mkdir notes.txt\nfirst\n");
        sh.run().await.unwrap();
        assert!(output(&sh).contains("command cancelled"));
        assert!(sh.filesystem().root().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let dir = TempDir::new().unwrap();
        let config = ShellConfig {
            autosave: false,
            ..config_in(&dir)
        };
        let mut sh = shell_bytes(config.clone(), b"mkdir keep.txt hi\n\xff\nls\nexit\n");
        sh.run().await.unwrap();

        let out = output(&sh);
        assert!(out.contains("Command not found"));
        assert!(out.contains("keep.txt"));
        assert!(out.contains("Goodbye"));

        let restored = StateStore::new(config.state_path()).load();
        assert!(restored.root().get("keep.txt").is_some());
    }
}
