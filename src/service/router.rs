//! Route table and request handlers.

use super::request::{
    Body, CompareRequest, CompareResponse, LookupGuidRequest, LookupGuidResponse,
    OfficeTitleRequest, TranslateRequest, TranslateResponse,
};
use super::{Response, ServiceError};
use crate::lookup::{find_guid, process_office_titles, translate_contest, ALTERNATE_KEY_FIELD};
use crate::reconcile::Reconciler;
use crate::value::json_kind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// Handler turns a decoded request body into a response body.
pub type Handler = fn(&Body) -> Result<serde_json::Value, ServiceError>;

pub const COMPARE_TABLES_ROUTE: &str = "comparetbl";
pub const LOOKUP_GUID_ROUTE: &str = "getlookupguid";
pub const OFFICE_TITLE_ROUTE: &str = "setofficetitle";
pub const TRANSLATE_CONTEST_ROUTE: &str = "translatecontest";

/// Router maps route names to handlers. Routes are registered explicitly;
/// nothing is registered behind the caller's back.
#[derive(Clone, Default)]
pub struct Router {
    routes: BTreeMap<String, Handler>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Router {
    /// Creates a router with no routes.
    pub fn new() -> Self {
        Router::default()
    }

    /// Creates a router serving reconciliation and the lookup helpers.
    pub fn with_default_routes() -> Self {
        Router::new()
            .route(COMPARE_TABLES_ROUTE, compare_tables)
            .route(LOOKUP_GUID_ROUTE, lookup_guid)
            .route(OFFICE_TITLE_ROUTE, set_office_titles)
            .route(TRANSLATE_CONTEST_ROUTE, translate_contest_record)
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn route(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.routes.insert(name.into(), handler);
        self
    }

    /// Returns the registered route names in sorted order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Serves one request. Failures become error envelopes; nothing is
    /// retried.
    pub fn handle(&self, route: &str, body: &str) -> Response {
        match self.dispatch(route, body) {
            Ok(value) => {
                info!(route, status = 200, "request served");
                Response::json(200, &value)
            }
            Err(err) => {
                let response = Response::error(route, &err);
                warn!(route, status = response.status, error = %err, "request failed");
                response
            }
        }
    }

    /// Decodes `body` and runs the handler registered under `route`.
    pub fn dispatch(&self, route: &str, body: &str) -> Result<serde_json::Value, ServiceError> {
        let handler = self.routes.get(route).ok_or_else(|| ServiceError::UnknownRoute {
            route: route.to_string(),
        })?;

        let body = serde_json::from_str::<serde_json::Value>(body).map_err(ServiceError::InvalidBody)?;
        let body = match body {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(ServiceError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        handler(&body)
    }
}

/// Reconciles `sql_table` against `dataverse_table`.
pub fn compare_tables(body: &Body) -> Result<serde_json::Value, ServiceError> {
    let request = CompareRequest::from_body(body)?;
    let options = request.options()?;
    let (left, right) = request.tables()?;
    let result = Reconciler::new(options).reconcile(&left, &right)?;
    encode(&CompareResponse::from(result))
}

/// Finds the GUID of the row whose alternate key equals `lookup_column`.
pub fn lookup_guid(body: &Body) -> Result<serde_json::Value, ServiceError> {
    let request = LookupGuidRequest::from_body(body)?;
    let result = find_guid(&request.data, &request.lookup_column, ALTERNATE_KEY_FIELD).cloned();
    encode(&LookupGuidResponse { result })
}

/// Builds office titles for a contest snapshot.
pub fn set_office_titles(body: &Body) -> Result<serde_json::Value, ServiceError> {
    let request = OfficeTitleRequest::from_body(body)?;
    let titles = process_office_titles(&request.office_title_formulas, &request.contest_snapshot)?;
    encode(&titles)
}

/// Translates one contest record through a glossary.
pub fn translate_contest_record(body: &Body) -> Result<serde_json::Value, ServiceError> {
    let request = TranslateRequest::from_body(body)?;
    let translated_contest = translate_contest(&request.contest, &request.glossary)?;
    encode(&TranslateResponse { translated_contest })
}

fn encode<T: Serialize>(body: &T) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(body).map_err(ServiceError::Encode)
}
