//! Input validation utilities
//!
//! Provides command-line and node-name validation.

use crate::navigate::path::SEPARATOR;
use crate::node::naming::is_navigation_token;

/// Validate that a command line is not empty, fits the configured length,
/// and carries no embedded control characters.
pub fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty()
        && input.len() <= max_length
        && !input.contains(['\0', '\r', '\n'])
}

/// Sanitize a raw console line
pub fn sanitize_input(input: &str) -> String {
    input.trim_end_matches(['\r', '\n']).trim().to_string()
}

/// Validate a single node name
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !is_navigation_token(name)
        && !name.contains(SEPARATOR)
        && !name.chars().any(char::is_control)
}
