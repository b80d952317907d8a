//! # Table Reconcile
//!
//! Row-set reconciliation between a system-of-record table and a downstream
//! replica of it.
//!
//! Given two collections of flat records and a primary key field, the engine
//! reports the rows only one side has and the rows both sides have with
//! diverging values. Null values are normalized to the empty string before
//! anything is compared, and the downstream row's generated identifier is
//! carried onto each diverging row.
//!
//! ## Modules
//!
//! - [`value`] - Scalar values, rows, and decoding of JSON/YAML documents
//! - [`reconcile`] - The reconciliation engine
//! - [`lookup`] - GUID lookup, office title assembly and contest translation
//! - [`service`] - Request/response boundary with an explicit route table
//!
//! ## Example
//!
//! ```
//! use table_reconcile::{reconcile, value};
//!
//! let left = value::from_json(r#"[{"id": "1", "name": "Alice"}]"#).unwrap();
//! let right = value::from_json(
//!     r#"[{"id": "1", "name": "Alicia", "dv_guid": "g1"}, {"id": "2", "name": "Bob"}]"#,
//! )
//! .unwrap();
//!
//! let result = reconcile(&left, &right, "id").unwrap();
//! assert!(result.only_in_left.is_empty());
//! assert_eq!(result.only_in_right.len(), 1);
//! assert_eq!(result.differing[0].get("dv_guid"), Some(&value::Value::from("g1")));
//! ```

pub mod lookup;
pub mod reconcile;
pub mod service;
pub mod value;

pub use lookup::LookupError;
pub use reconcile::{
    reconcile, DuplicateKeyPolicy, ReconcileError, ReconcileOptions, ReconciliationResult,
    Reconciler, Side,
};
pub use service::{Response, Router, ServiceError};
pub use value::{Row, Value};
