//! Reconciliation errors.

use crate::value::RowError;
use std::fmt;
use thiserror::Error;

/// Side names one of the two input collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The system-of-record collection. Drives field comparison.
    Left,
    /// The downstream collection. Carries the secondary identifier.
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ReconcileError is raised for an input that violates the reconciliation
/// contract. The whole invocation fails on the first violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("no primary key field name was supplied")]
    MissingPrimaryKeyArgument,

    #[error("{side} row {row}: missing primary key field '{field}'")]
    RowMissingKeyField {
        side: Side,
        row: usize,
        field: String,
    },

    #[error("{side} collection is malformed")]
    MalformedRow {
        side: Side,
        #[source]
        source: RowError,
    },

    #[error("{side} rows {first_row} and {row} share primary key '{key}'")]
    DuplicatePrimaryKey {
        side: Side,
        key: String,
        first_row: usize,
        row: usize,
    },
}

impl ReconcileError {
    /// Creates a row missing key field error.
    pub fn row_missing_key_field(side: Side, row: usize, field: impl Into<String>) -> Self {
        ReconcileError::RowMissingKeyField {
            side,
            row,
            field: field.into(),
        }
    }

    /// Creates a malformed row error.
    pub fn malformed(side: Side, source: RowError) -> Self {
        ReconcileError::MalformedRow { side, source }
    }

    /// Creates a duplicate primary key error.
    pub fn duplicate_primary_key(
        side: Side,
        key: impl Into<String>,
        first_row: usize,
        row: usize,
    ) -> Self {
        ReconcileError::DuplicatePrimaryKey {
            side,
            key: key.into(),
            first_row,
            row,
        }
    }

    /// Returns the collection the error was found in, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            ReconcileError::MissingPrimaryKeyArgument => None,
            ReconcileError::RowMissingKeyField { side, .. }
            | ReconcileError::MalformedRow { side, .. }
            | ReconcileError::DuplicatePrimaryKey { side, .. } => Some(*side),
        }
    }

    /// Returns the index of the offending row, if one row is to blame.
    pub fn row(&self) -> Option<usize> {
        match self {
            ReconcileError::MissingPrimaryKeyArgument => None,
            ReconcileError::RowMissingKeyField { row, .. }
            | ReconcileError::DuplicatePrimaryKey { row, .. } => Some(*row),
            ReconcileError::MalformedRow { source, .. } => source.row(),
        }
    }
}
