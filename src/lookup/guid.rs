//! GUID lookup by alternate key.

use super::LookupError;
use crate::value::{Row, Value};

/// Field holding the generated identifier returned by a lookup.
pub const GUID_FIELD: &str = "gv_guid";

/// Field holding the alternate key a lookup matches against.
pub const ALTERNATE_KEY_FIELD: &str = "alternate_key_column";

/// Returns the GUID of the first row whose `alternate_key_column` equals
/// `lookup_value`.
pub fn find_guid<'a>(
    data: &'a [Row],
    lookup_value: &Value,
    alternate_key_column: &str,
) -> Option<&'a Value> {
    data.iter()
        .find(|row| row.get(alternate_key_column) == Some(lookup_value))
        .and_then(|row| row.get(GUID_FIELD))
}

/// Checks that every lookup row carries both the GUID and the alternate key.
pub fn validate_lookup_data(data: &[Row]) -> Result<(), LookupError> {
    for (index, row) in data.iter().enumerate() {
        for field in [GUID_FIELD, ALTERNATE_KEY_FIELD] {
            if !row.has(field) {
                return Err(LookupError::missing_field("data", index, field));
            }
        }
    }
    Ok(())
}
