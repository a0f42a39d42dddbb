//! Error handlers
//!
//! Provides error reporting and classification functions.

use crate::error::types::{FsError, ShellError};
use log::{error, warn};

/// Log a shell error
pub fn handle_error(err: &ShellError) {
    match err {
        ShellError::Fs(FsError::Unauthorized(path)) => {
            warn!("Access denied on {}", path);
        }
        ShellError::Fs(e) => warn!("Command failed: {}", e),
        other => error!("Shell error: {}", other),
    }
}

/// Stable label for an error kind, used in console output and tests
pub fn error_kind(err: &FsError) -> &'static str {
    match err {
        FsError::InvalidPath(_) => "InvalidPath",
        FsError::NotFound(_) => "NotFound",
        FsError::NotAFile(_) => "NotAFile",
        FsError::NotAFolder(_) => "NotAFolder",
        FsError::Unauthorized(_) => "Unauthorized",
        FsError::NameCollision(_) => "NameCollision",
        FsError::OutOfRange { .. } => "OutOfRange",
        FsError::MalformedCommand(_) => "MalformedCommand",
        FsError::InputRequired(_) => "InputRequired",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(error_kind(&FsError::not_found("/a")), "NotFound");
        assert_eq!(
            error_kind(&FsError::OutOfRange { index: 4, len: 2 }),
            "OutOfRange"
        );
        assert_eq!(error_kind(&FsError::unauthorized("/v")), "Unauthorized");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = FsError::OutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Line 4 is out of range (file has 2 lines)"
        );
    }
}
