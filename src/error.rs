//! Typed error handling for the heroes API
//!
//! Two failure kinds are modeled, matching the HTTP contract:
//!
//! - [`ApiError::NotFound`]: an entity lookup by id yielded nothing → 404
//!   with `{"error": "<Resource> not found"}`
//! - [`ApiError::Validation`]: a constraint violation on write → 400 with
//!   `{"errors": ["<message>", ...]}`
//!
//! Anything else (storage failures, lock poisoning) is an internal error and
//! returns a generic 500 body without leaking details to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// A collection of field validation failures.
///
/// Validation runs synchronously before a value is accepted into an entity;
/// all failing constraints are collected so the client sees every problem in
/// one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable error messages, one per violated constraint
    pub errors: Vec<String>,
}

impl ValidationError {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validation error from a single message
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// Record a failed constraint
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record the result of a single validator run
    pub fn check(&mut self, result: Result<(), String>) {
        if let Err(message) = result {
            self.errors.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into `Err(self)` if any constraint failed
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// The main error type returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Entity lookup by id yielded nothing
    NotFound {
        /// Display name of the missing resource (e.g. "Hero", "Power")
        resource: &'static str,
    },

    /// One or more write-time constraints were violated
    Validation(ValidationError),

    /// Storage or other unexpected failure; details stay server-side
    Internal(anyhow::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the JSON body for this error
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::NotFound { resource } => {
                json!({ "error": format!("{} not found", resource) })
            }
            ApiError::Validation(e) => json!({ "errors": e.errors }),
            ApiError::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { resource } => write!(f, "{} not found", resource),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Internal(e) => e.source(),
            _ => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!("request failed: {:#}", e);
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_returns_404() {
        let err = ApiError::NotFound { resource: "Hero" };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), json!({ "error": "Hero not found" }));
    }

    #[test]
    fn test_validation_returns_400_with_message_list() {
        let err = ApiError::Validation(ValidationError::single("strength is invalid"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), json!({ "errors": ["strength is invalid"] }));
    }

    #[test]
    fn test_internal_returns_500_without_details() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused to db at 10.0.0.3"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_validation_collector_accumulates() {
        let mut errors = ValidationError::new();
        assert!(errors.is_empty());
        errors.check(Ok(()));
        errors.check(Err("first".to_string()));
        errors.push("second");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.errors, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_collector_into_result_is_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }
}
