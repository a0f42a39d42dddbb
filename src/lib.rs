pub mod auth;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod navigate;
pub mod node;
pub mod persistence;
pub mod protocol;
pub mod shell;
pub mod storage;
pub mod utils;

pub use filesystem::FileSystem;
pub use shell::Shell;
