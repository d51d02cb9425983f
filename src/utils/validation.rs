//! Input validation helpers for request payloads

use crate::utils::error::{AdminError, Result};

/// Validate email address format
pub fn validate_email(email: &str) -> Result<()> {
    let email_regex = regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|e| AdminError::internal(format!("Regex error: {}", e)))?;

    if !email_regex.is_match(email) {
        return Err(AdminError::validation("Please provide a valid email"));
    }
    Ok(())
}

/// Validate that a field's character count lies within `min..=max`
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(AdminError::validation(format!(
            "{} must be at least {} characters long",
            field, min
        )));
    }
    if len > max {
        return Err(AdminError::validation(format!(
            "{} cannot exceed {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Validate an optional free-text field's maximum length
pub fn validate_max_length(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(AdminError::validation(format!(
            "{} cannot exceed {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Validate a new password against the configured minimum length
pub fn validate_password(password: &str, min_length: usize) -> Result<()> {
    if password.chars().count() < min_length {
        return Err(AdminError::validation(format!(
            "Password must be at least {} characters long",
            min_length
        )));
    }
    if password.len() > 128 {
        return Err(AdminError::validation(
            "Password cannot exceed 128 characters",
        ));
    }
    Ok(())
}
