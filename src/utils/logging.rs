//! Logging utilities
//!
//! Provides logging setup and command tracing.

use log::debug;

/// Setup logging for the shell.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second init (e.g. from tests) is not an error worth surfacing
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Log a dispatched command
pub fn log_command(cwd: &str, command: &str) {
    debug!("[{}] executing: {}", cwd, command);
}
