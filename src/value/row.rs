//! Rows and row collections.

use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Row is one flat record: a mapping from field name to scalar value.
///
/// Fields are kept sorted by name; field order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

/// RowError describes why a document could not be read as a list of rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("failed to parse document: {message}")]
    Syntax { message: String },

    #[error("expected a list of rows, got {found}")]
    NotAList { found: &'static str },

    #[error("row {row}: expected an object, got {found}")]
    NotAnObject { row: usize, found: &'static str },

    #[error("row {row}: field '{field}' holds {found}, expected a scalar")]
    NonScalarField {
        row: usize,
        field: String,
        found: &'static str,
    },
}

impl RowError {
    /// Returns the index of the offending row, when one row is to blame.
    pub fn row(&self) -> Option<usize> {
        match self {
            RowError::NotAnObject { row, .. } | RowError::NonScalarField { row, .. } => Some(*row),
            RowError::Syntax { .. } | RowError::NotAList { .. } => None,
        }
    }
}

impl Row {
    pub fn new() -> Self {
        Row {
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns a copy with every null field replaced by the empty string.
    pub fn normalized(&self) -> Row {
        Row {
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.normalized()))
                .collect(),
        }
    }

    /// Reads a row from a JSON object. `index` is only used for error reporting.
    pub fn from_json(json: &serde_json::Value, index: usize) -> Result<Row, RowError> {
        let object = json.as_object().ok_or(RowError::NotAnObject {
            row: index,
            found: json_kind(json),
        })?;

        let mut row = Row::new();
        for (name, value) in object {
            let value = Value::from_json(value).ok_or_else(|| RowError::NonScalarField {
                row: index,
                field: name.clone(),
                found: json_kind(value),
            })?;
            row.fields.insert(name.clone(), value);
        }
        Ok(row)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Returns a copy of the collection with every row normalized.
pub fn normalize(rows: &[Row]) -> Vec<Row> {
    rows.iter().map(Row::normalized).collect()
}

/// Reads a list of rows from a decoded JSON document.
pub fn rows_from_json_value(json: &serde_json::Value) -> Result<Vec<Row>, RowError> {
    let items = json.as_array().ok_or(RowError::NotAList {
        found: json_kind(json),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Row::from_json(item, index))
        .collect()
}

/// Parse a list of rows from JSON.
pub fn from_json(json: &str) -> Result<Vec<Row>, RowError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| RowError::Syntax {
        message: e.to_string(),
    })?;
    rows_from_json_value(&value)
}

/// Parse a list of rows from YAML. JSON documents are accepted as well.
pub fn from_yaml(yaml: &str) -> Result<Vec<Row>, RowError> {
    let value: serde_json::Value = serde_yaml::from_str(yaml).map_err(|e| RowError::Syntax {
        message: e.to_string(),
    })?;
    rows_from_json_value(&value)
}

/// Names the JSON type of a value for error messages.
pub(crate) fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
