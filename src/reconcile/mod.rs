//! Reconcile module - Row-set reconciliation between two sources.
//!
//! Given a left (system-of-record) and a right (downstream) collection and a
//! primary key field, computes the rows exclusive to each side and the rows
//! present in both whose other fields differ.

mod error;
mod index;
mod options;
mod reconciler;
mod result;

#[cfg(test)]
mod reconcile_test;

pub use error::*;
pub use options::*;
pub use reconciler::*;
pub use result::*;
