//! Error types shared across the crate.
//!
//! `ValidationError` covers value objects built from untrusted input
//! (family ids, weights, classification ranges). `DomainError` is the flat
//! shape every port and handler error converts into.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Rejected input while building a value object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Ports
    StorageError,
    CacheError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::CacheError => "CACHE_ERROR",
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCode::StorageError | ErrorCode::CacheError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened error with a code, a message and optional key/value details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// A failed read or write against a survey, rating or history store.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// A failed balance cache access.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let (code, field) = match &err {
            ValidationError::EmptyField { field } => (ErrorCode::EmptyField, field.clone()),
            ValidationError::OutOfRange { field, .. } => (ErrorCode::OutOfRange, field.clone()),
            ValidationError::InvalidFormat { field, .. } => (ErrorCode::InvalidFormat, field.clone()),
        };
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_prints_whole_bounds_without_decimals() {
        let err = ValidationError::out_of_range("task_weight", 1.0, 10.0, 15.0);
        assert_eq!(err.to_string(), "Field 'task_weight' must be between 1 and 10, got 15");
    }

    #[test]
    fn out_of_range_keeps_fractional_values() {
        let err = ValidationError::out_of_range("task_weight", 1.0, 10.0, 10.5);
        assert_eq!(err.to_string(), "Field 'task_weight' must be between 1 and 10, got 10.5");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::storage("store offline");
        assert_eq!(err.to_string(), "[STORAGE_ERROR] store offline");
    }

    #[test]
    fn port_errors_are_transient() {
        assert!(DomainError::storage("x").code.is_transient());
        assert!(DomainError::cache("x").code.is_transient());
        assert!(!ErrorCode::InvalidFormat.is_transient());
    }

    #[test]
    fn validation_error_converts_with_code_and_field_detail() {
        let err: DomainError = ValidationError::empty_field("family_id").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.details.get("field").map(String::as_str), Some("family_id"));
        assert!(err.message.contains("family_id"));
    }
}
