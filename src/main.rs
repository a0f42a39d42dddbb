//! VFS Shell - Entry Point
//!
//! An interactive in-memory filesystem with password-gated nodes and JSON
//! persistence.

use log::info;

use vfs_shell::Shell;
use vfs_shell::config::ShellConfig;
use vfs_shell::error::ShellError;
use vfs_shell::error::handlers::handle_error;
use vfs_shell::utils::logging::setup_logging;

#[tokio::main]
async fn main() {
    let config = match ShellConfig::load() {
        Ok(config) => config,
        Err(e) => {
            setup_logging("warn");
            let err = ShellError::from(e);
            handle_error(&err);
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    setup_logging(&config.log_level);
    info!("Launching VFS shell (state file: {})", config.state_file);

    let mut shell = Shell::new(config);
    if let Err(e) = shell.run().await {
        handle_error(&e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
