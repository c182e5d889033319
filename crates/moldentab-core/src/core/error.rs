use std::fmt::Display;
use thiserror::Error;

/// A caller-correctable input error.
///
/// Carries the offending field, the constraint it had to satisfy, and the value
/// that was actually supplied, so that front-ends can present it without having
/// to know which operation produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid value for '{field}': expected {expected}, got {actual}")]
pub struct ValidationError {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Display) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }
}
