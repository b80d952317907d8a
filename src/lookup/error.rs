//! Lookup errors.

use thiserror::Error;

/// LookupError is raised when a record handed to a lookup helper lacks a
/// field the helper needs, or holds it in an unusable form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{collection}[{row}]: missing field '{field}'")]
    MissingField {
        collection: String,
        row: usize,
        field: String,
    },

    #[error("{collection}[{row}]: field '{field}' must be {expected}")]
    InvalidField {
        collection: String,
        row: usize,
        field: String,
        expected: String,
    },

    #[error("{collection}[{row}]: field '{field}' is not an integer: '{value}'")]
    NotAnInteger {
        collection: String,
        row: usize,
        field: String,
        value: String,
    },
}

impl LookupError {
    /// Creates a missing field error.
    pub fn missing_field(collection: impl Into<String>, row: usize, field: impl Into<String>) -> Self {
        LookupError::MissingField {
            collection: collection.into(),
            row,
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(
        collection: impl Into<String>,
        row: usize,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        LookupError::InvalidField {
            collection: collection.into(),
            row,
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Creates a not-an-integer error.
    pub fn not_an_integer(
        collection: impl Into<String>,
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        LookupError::NotAnInteger {
            collection: collection.into(),
            row,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns where the error was found, as `collection[row]`.
    pub fn location(&self) -> String {
        match self {
            LookupError::MissingField { collection, row, .. }
            | LookupError::InvalidField { collection, row, .. }
            | LookupError::NotAnInteger { collection, row, .. } => {
                format!("{}[{}]", collection, row)
            }
        }
    }
}
