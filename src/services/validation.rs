//! Field validation helpers
//!
//! Each check returns a human-readable message naming the field, which the
//! services wrap in their own `ValidationError` variant. Lengths count
//! Unicode scalar values, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Require `min..=max` characters
pub fn length_between(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!(
            "{} must be between {} and {} characters",
            field, min, max
        ));
    }
    Ok(())
}

/// Require at least `min` characters
pub fn min_length(field: &str, value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("{} must be at least {} characters", field, min));
    }
    Ok(())
}

/// Allow at most `max` characters
pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(value) {
        return Err("email is not a valid email address".to_string());
    }
    Ok(())
}
