//! Service errors.

use super::request::{DATAVERSE_TABLE, PRIMARY_KEY, SQL_TABLE};
use crate::lookup::LookupError;
use crate::reconcile::{ReconcileError, Side};
use crate::value::RowError;
use thiserror::Error;

/// ServiceError is any failure turning a request body into a response body.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request body could not be decoded")]
    InvalidBody(#[source] serde_json::Error),

    #[error("request body must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("missing required parameter '{name}'")]
    MissingParameter { name: String },

    #[error("'{name}' should be a non-empty list")]
    EmptyList { name: String },

    #[error("'{name}' must be {expected}")]
    InvalidParameter { name: String, expected: String },

    #[error("'{name}' is malformed")]
    MalformedRows {
        name: String,
        #[source]
        source: RowError,
    },

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("no route registered for '{route}'")]
    UnknownRoute { route: String },

    #[error("failed to encode response body")]
    Encode(#[source] serde_json::Error),
}

impl ServiceError {
    /// Creates a missing parameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        ServiceError::MissingParameter { name: name.into() }
    }

    /// Creates an empty list error.
    pub fn empty_list(name: impl Into<String>) -> Self {
        ServiceError::EmptyList { name: name.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, expected: impl Into<String>) -> Self {
        ServiceError::InvalidParameter {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Creates a malformed rows error.
    pub fn malformed_rows(name: impl Into<String>, source: RowError) -> Self {
        ServiceError::MalformedRows {
            name: name.into(),
            source,
        }
    }

    /// Returns the response status for this error.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::UnknownRoute { .. } => 404,
            ServiceError::Encode(_) => 500,
            _ => 400,
        }
    }

    /// Returns the request position the error was found at, if known.
    pub fn location(&self) -> Option<String> {
        match self {
            ServiceError::InvalidBody(_) | ServiceError::NotAnObject { .. } => {
                Some("body".to_string())
            }
            ServiceError::MissingParameter { name }
            | ServiceError::EmptyList { name }
            | ServiceError::InvalidParameter { name, .. } => Some(name.clone()),
            ServiceError::MalformedRows { name, source } => Some(indexed(name, source.row())),
            ServiceError::Reconcile(err) => Some(match err.side() {
                None => PRIMARY_KEY.to_string(),
                Some(side) => indexed(table_parameter(side), err.row()),
            }),
            ServiceError::Lookup(err) => Some(err.location()),
            ServiceError::UnknownRoute { .. } | ServiceError::Encode(_) => None,
        }
    }

    /// Returns the messages of this error and all of its causes, outermost
    /// first.
    pub fn trace(&self) -> Vec<String> {
        std::iter::successors(Some(self as &dyn std::error::Error), |&err| err.source())
            .map(|err| err.to_string())
            .collect()
    }
}

/// Names the request parameter carrying one side's collection.
pub fn table_parameter(side: Side) -> &'static str {
    match side {
        Side::Left => SQL_TABLE,
        Side::Right => DATAVERSE_TABLE,
    }
}

fn indexed(name: &str, row: Option<usize>) -> String {
    match row {
        Some(row) => format!("{}[{}]", name, row),
        None => name.to_string(),
    }
}
