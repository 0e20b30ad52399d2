//! Username validation
//!
//! NIST 800-53: SI-10 (Information Input Validation)
//! STIG: V-222396 - Input validation
//! Implementation: Allow-list validation applied before any state-file path
//! is constructed from a remote-supplied username.

use crate::{Error, Result};

/// Validate a username against the allowed character set.
///
/// Usernames name state files on disk (`<state_root>/<username>.json`),
/// so anything that could navigate the filesystem is rejected: the name
/// must be non-empty, must consist only of ASCII alphanumerics, `.`, `_`,
/// and `-`, and must not be `.` or `..`.
///
/// # Errors
///
/// Returns [`Error::InvalidUsername`] describing the first violation.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::InvalidUsername("username is empty".into()));
    }

    if username == "." || username == ".." {
        return Err(Error::InvalidUsername(format!(
            "username may not be '{}'",
            username
        )));
    }

    if let Some(c) = username.chars().find(|c| !is_allowed_char(*c)) {
        return Err(Error::InvalidUsername(format!(
            "username '{}' contains disallowed character '{}'",
            username, c
        )));
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}
