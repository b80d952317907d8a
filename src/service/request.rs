//! Request payloads and response bodies.

use super::ServiceError;
use crate::lookup::validate_lookup_data;
use crate::reconcile::{
    decode_rows, DuplicateKeyPolicy, ReconcileError, ReconcileOptions, ReconciliationResult, Side,
};
use crate::value::{json_kind, rows_from_json_value, Row, Value};
use serde::{Deserialize, Serialize};

/// Request parameter holding the system-of-record rows.
pub const SQL_TABLE: &str = "sql_table";
/// Request parameter holding the downstream rows.
pub const DATAVERSE_TABLE: &str = "dataverse_table";
/// Request parameter naming the primary key field.
pub const PRIMARY_KEY: &str = "primary_key";

/// Body is a decoded JSON request object.
pub type Body = serde_json::Map<String, serde_json::Value>;

/// CompareRequest asks for the reconciliation of two tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompareRequest {
    /// Missing or null means an empty table.
    #[serde(default)]
    pub sql_table: serde_json::Value,
    pub dataverse_table: Option<serde_json::Value>,
    pub primary_key: Option<String>,
    pub secondary_identifier: Option<String>,
    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl CompareRequest {
    pub fn from_body(body: &Body) -> Result<Self, ServiceError> {
        serde_json::from_value(serde_json::Value::Object(body.clone()))
            .map_err(ServiceError::InvalidBody)
    }

    /// Builds the reconciliation options. Fails without a primary key.
    pub fn options(&self) -> Result<ReconcileOptions, ReconcileError> {
        let mut builder = ReconcileOptions::builder().duplicate_keys(self.duplicate_keys);
        if let Some(primary_key) = &self.primary_key {
            builder = builder.primary_key(primary_key.as_str());
        }
        if let Some(field) = &self.secondary_identifier {
            builder = builder.secondary_identifier(field.as_str());
        }
        builder.build()
    }

    /// Decodes both tables.
    pub fn tables(&self) -> Result<(Vec<Row>, Vec<Row>), ServiceError> {
        let left = match &self.sql_table {
            serde_json::Value::Null => Vec::new(),
            table => decode_rows(Side::Left, table)?,
        };
        let right = match &self.dataverse_table {
            Some(table) => decode_rows(Side::Right, table)?,
            None => return Err(ServiceError::missing_parameter(DATAVERSE_TABLE)),
        };
        Ok((left, right))
    }
}

/// CompareResponse is the body returned for a reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub only_in_sql_table: Vec<Row>,
    pub only_in_dataverse_table: Vec<Row>,
    pub common_rows_diff_values: Vec<Row>,
}

impl From<ReconciliationResult> for CompareResponse {
    fn from(result: ReconciliationResult) -> Self {
        CompareResponse {
            only_in_sql_table: result.only_in_left,
            only_in_dataverse_table: result.only_in_right,
            common_rows_diff_values: result.differing,
        }
    }
}

/// LookupGuidRequest asks for the GUID of the row with a given alternate key.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupGuidRequest {
    pub lookup_column: Value,
    pub data: Vec<Row>,
}

impl LookupGuidRequest {
    pub fn from_body(body: &Body) -> Result<Self, ServiceError> {
        let lookup_column = body
            .get("lookup_column")
            .ok_or_else(|| ServiceError::missing_parameter("lookup_column"))?;
        let data = body
            .get("data")
            .ok_or_else(|| ServiceError::missing_parameter("data"))?;

        let lookup_column = Value::from_json(lookup_column)
            .ok_or_else(|| ServiceError::invalid_parameter("lookup_column", "a scalar"))?;

        if !data.as_array().is_some_and(|items| !items.is_empty()) {
            return Err(ServiceError::empty_list("data"));
        }
        let data =
            rows_from_json_value(data).map_err(|e| ServiceError::malformed_rows("data", e))?;
        validate_lookup_data(&data)?;

        Ok(LookupGuidRequest {
            lookup_column,
            data,
        })
    }
}

/// LookupGuidResponse carries the GUID found, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupGuidResponse {
    pub result: Option<Value>,
}

/// OfficeTitleRequest asks for office titles of a contest snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeTitleRequest {
    pub office_title_formulas: Vec<Row>,
    pub contest_snapshot: Vec<Row>,
}

impl OfficeTitleRequest {
    pub fn from_body(body: &Body) -> Result<Self, ServiceError> {
        Ok(OfficeTitleRequest {
            office_title_formulas: non_empty_rows(body, "office_title_formulas")?,
            contest_snapshot: non_empty_rows(body, "contest_snapshot")?,
        })
    }
}

/// TranslateRequest asks for the translation of one contest record.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    pub contest: Row,
    pub glossary: Vec<Row>,
}

impl TranslateRequest {
    pub fn from_body(body: &Body) -> Result<Self, ServiceError> {
        let contest = match body.get("contest") {
            None | Some(serde_json::Value::Null) => Row::new(),
            Some(json) if json.is_object() => {
                Row::from_json(json, 0).map_err(|e| ServiceError::malformed_rows("contest", e))?
            }
            Some(_) => return Err(ServiceError::invalid_parameter("contest", "an object")),
        };
        let glossary = match body.get("glossary") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(json) => rows_from_json_value(json)
                .map_err(|e| ServiceError::malformed_rows("glossary", e))?,
        };
        Ok(TranslateRequest { contest, glossary })
    }
}

/// TranslateResponse carries the translated contest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_contest: Row,
}

/// Reads a required, non-empty list of rows.
fn non_empty_rows(body: &Body, name: &str) -> Result<Vec<Row>, ServiceError> {
    match body.get(name) {
        None | Some(serde_json::Value::Null) => Err(ServiceError::empty_list(name)),
        Some(serde_json::Value::Array(items)) if items.is_empty() => {
            Err(ServiceError::empty_list(name))
        }
        Some(json) if !json.is_array() => Err(ServiceError::invalid_parameter(
            name,
            format!("a list, got {}", json_kind(json)),
        )),
        Some(json) => rows_from_json_value(json).map_err(|e| ServiceError::malformed_rows(name, e)),
    }
}
