//! Reusable field validators
//!
//! Each validator is a closure taking a human-facing field label and the
//! candidate value, returning the error message for the response body on
//! failure. Entities run these before a value is accepted (see
//! [`crate::model`]).

/// Validator: string must have at least `min` characters
pub fn min_length(min: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.chars().count() < min {
            Err(format!(
                "{} must be at least {} characters long",
                field, min
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be one of the allowed values
pub fn one_of(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if allowed.contains(&value) {
            Ok(())
        } else {
            let list = allowed
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(", ");
            Err(format!(
                "{} must be one of the following values: {}",
                field, list
            ))
        }
    }
}

/// Validator: string must be non-empty
pub fn present() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.is_empty() {
            Err(format!("{} must be present", field))
        } else {
            Ok(())
        }
    }
}
