//! Lookup module - Record lookups that accompany reconciliation.
//!
//! GUID lookup by alternate key, office title assembly from templates, and
//! glossary translation of contest records.

mod error;
mod guid;
mod office_title;
mod translate;

pub use error::*;
pub use guid::*;
pub use office_title::*;
pub use translate::*;

use crate::value::{Row, Value};

/// Returns a field every record of `collection` must carry.
pub(crate) fn require<'a>(
    row: &'a Row,
    collection: &str,
    index: usize,
    field: &str,
) -> Result<&'a Value, LookupError> {
    row.get(field)
        .ok_or_else(|| LookupError::missing_field(collection, index, field))
}
