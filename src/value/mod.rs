//! Value module - Flat records as exchanged between the two sources.
//!
//! Provides scalar field values, rows, null normalization and decoding of
//! JSON/YAML documents into row collections.

mod row;
mod value;

pub use row::*;
pub use value::*;
