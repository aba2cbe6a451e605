//! Local input validation.
//!
//! Pure functions, reproducible without network access. Failures never
//! reach the wire.

use std::sync::LazyLock;

use regex::Regex;

use super::error::DirectoryError;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone regex"));

/// Checks a 10-digit phone number.
///
/// # Errors
/// Returns `DirectoryError::Validation` when the input doesn't match.
pub fn validate_phone(phone: &str) -> Result<(), DirectoryError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(DirectoryError::Validation(
            "Enter a valid 10-digit phone number".to_string(),
        ))
    }
}

/// Checks that a required free-form field is non-empty after trimming.
///
/// # Errors
/// Returns `DirectoryError::Validation` naming the field when it is empty.
pub fn validate_required(name: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        Err(DirectoryError::Validation(format!("{name} is required")))
    } else {
        Ok(())
    }
}
