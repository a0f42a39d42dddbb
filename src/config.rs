//! Configuration management for the VFS shell
//!
//! Values come from built-in defaults, then an optional `config.toml`, then
//! environment variables prefixed with `VFS_SHELL_`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// JSON file the session is saved to and restored from
    /// Environment: VFS_SHELL_STATE_FILE
    pub state_file: String,

    /// Save after every successful mutating command
    pub autosave: bool,

    /// Line that ends multi-line content input
    pub content_terminator: String,

    /// Longest accepted command line, in bytes
    pub max_command_length: usize,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            state_file: "vfs_state.json".to_string(),
            autosave: true,
            content_terminator: "EOF".to_string(),
            max_command_length: 512,
            log_level: "warn".to_string(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`ShellConfig::load`] with an explicit config file base name.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("state_file", defaults.state_file)?
            .set_default("autosave", defaults.autosave)?
            .set_default("content_terminator", defaults.content_terminator)?
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("VFS_SHELL"))
            .build()?;

        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.state_file.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "state_file cannot be empty".into(),
            ));
        }

        if self.content_terminator.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "content_terminator cannot be empty".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get the state file as PathBuf
    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(&self.state_file)
    }
}
