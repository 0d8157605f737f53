//! Validation error type
//!
//! Messages follow the `"<field>" <constraint>` wording clients of the
//! service already parse.

use thiserror::Error;

/// A candidate record failed validation.
///
/// Carries the offending field and a human-readable message naming the
/// violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }

    /// The candidate itself is not a JSON object
    pub fn not_an_object() -> Self {
        Self::new("value", "\"value\" must be of type object".to_string())
    }

    /// A required field is absent
    pub fn required(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is required", field))
    }

    /// A field that must be a string holds another JSON type
    pub fn not_a_string(field: &str) -> Self {
        Self::new(field, format!("\"{}\" must be a string", field))
    }

    /// A string field is present but empty
    pub fn empty(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is not allowed to be empty", field))
    }

    /// A numeric field holds a non-number
    pub fn not_a_number(field: &str) -> Self {
        Self::new(field, format!("\"{}\" must be a number", field))
    }

    /// A numeric field holds a fractional number
    pub fn not_an_integer(field: &str) -> Self {
        Self::new(field, format!("\"{}\" must be an integer", field))
    }

    /// A numeric field is below its lower bound
    pub fn below_min(field: &str, min: i64) -> Self {
        Self::new(
            field,
            format!("\"{}\" must be greater than or equal to {}", field, min),
        )
    }

    /// A numeric field is above its upper bound
    pub fn above_max(field: &str, max: i64) -> Self {
        Self::new(
            field,
            format!("\"{}\" must be less than or equal to {}", field, max),
        )
    }

    /// Name of the field that failed
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable reason
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
