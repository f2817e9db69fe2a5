//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_HANDLE_LENGTH;

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("handle pattern is valid"));

/// Validate a platform handle
pub fn validate_handle(handle: &str) -> Result<(), &'static str> {
    if handle.is_empty() {
        return Err("Handle cannot be empty");
    }
    if handle.len() > MAX_HANDLE_LENGTH {
        return Err("Handle must be at most 64 characters");
    }
    if !HANDLE_PATTERN.is_match(handle) {
        return Err("Handle can only contain letters, numbers, underscores, dots, and hyphens");
    }
    Ok(())
}

/// Validate a level bound (a single ASCII letter)
pub fn validate_level(level: &str) -> Result<(), validator::ValidationError> {
    let mut chars = level.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(()),
        _ => Err(validator::ValidationError::new("level_must_be_a_letter")),
    }
}

/// Split a comma-separated list, dropping empty items
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
