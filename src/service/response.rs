//! Response envelopes.

use super::ServiceError;
use serde::{Deserialize, Serialize};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response is the status and encoded body produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// ErrorEnvelope is the body of every failed request.
///
/// `trace` lists the error and its causes, outermost first. It is meant for
/// operators, not end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub location: String,
    pub trace: Vec<String>,
}

impl ErrorEnvelope {
    /// Builds the envelope for an error raised while serving `route`.
    pub fn new(route: &str, err: &ServiceError) -> Self {
        ErrorEnvelope {
            error: err.to_string(),
            location: err.location().unwrap_or_else(|| route.to_string()),
            trace: err.trace(),
        }
    }
}

impl Response {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Response {
            status,
            content_type: JSON_CONTENT_TYPE,
            body: body.to_string(),
        }
    }

    /// Encodes `err` as an error envelope. Should the envelope itself fail to
    /// encode, the body is that failure's message as a JSON string.
    pub fn error(route: &str, err: &ServiceError) -> Self {
        let body = serde_json::to_value(ErrorEnvelope::new(route, err))
            .unwrap_or_else(|e| serde_json::Value::String(e.to_string()));
        Response::json(err.status(), &body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body of a failed response.
    pub fn error_envelope(&self) -> Option<ErrorEnvelope> {
        if self.is_success() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}
