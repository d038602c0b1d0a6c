//! Validation error types for client options.
//!
//! This module defines the errors reported when a set of client options
//! does not pass the options validator.

use std::fmt;

/// Errors that can occur while validating client options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field is present but holds an empty string.
    EmptyField {
        /// The name of the empty field (e.g., "client_id" or "token").
        field_path: String,
    },

    /// A field value is not one of the allowed enum values.
    InvalidEnumValue {
        /// The path to the field with the invalid value.
        field_path: String,
        /// The value that was found.
        value: String,
        /// The list of allowed values.
        allowed: Vec<String>,
    },

    /// A field value does not match the required pattern.
    PatternMismatch {
        /// The path to the field with the pattern mismatch.
        field_path: String,
        /// The pattern that should have been matched.
        pattern: String,
    },

    /// Failed to parse options from their serialized form.
    ParseError(String),

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Collapse a list of errors into a single error, if there are any.
    pub(crate) fn from_errors(mut errors: Vec<ValidationError>) -> Option<ValidationError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field_path } => {
                write!(f, "Field '{}' must not be empty", field_path)
            }
            ValidationError::InvalidEnumValue {
                field_path,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': must be one of [{}]",
                    value,
                    field_path,
                    allowed.join(", ")
                )
            }
            ValidationError::PatternMismatch {
                field_path,
                pattern,
            } => {
                write!(
                    f,
                    "Field '{}' does not match required pattern: {}",
                    field_path, pattern
                )
            }
            ValidationError::ParseError(msg) => {
                write!(f, "Failed to parse options: {}", msg)
            }
            ValidationError::Multiple(errors) => {
                writeln!(f, "Multiple validation errors occurred:")?;
                for (i, error) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::ParseError(err.to_string())
    }
}
