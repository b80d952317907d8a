//! Reconciliation options.

use super::ReconcileError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field conventionally holding the downstream row's generated identifier.
pub const DEFAULT_SECONDARY_IDENTIFIER: &str = "dv_guid";

/// DuplicateKeyPolicy decides what happens when a primary key value repeats
/// within one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Fail the invocation with `DuplicatePrimaryKey`.
    #[default]
    Reject,
    /// Accept duplicates: exclusivity collapses them, and every key-equal
    /// pair across the two collections is compared.
    CrossProduct,
}

impl DuplicateKeyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateKeyPolicy::Reject => "reject",
            DuplicateKeyPolicy::CrossProduct => "cross_product",
        }
    }
}

impl fmt::Display for DuplicateKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(DuplicateKeyPolicy::Reject),
            "cross_product" | "cross-product" => Ok(DuplicateKeyPolicy::CrossProduct),
            other => Err(format!(
                "unknown duplicate key policy '{}' (expected 'reject' or 'cross-product')",
                other
            )),
        }
    }
}

/// ReconcileOptions configures one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Field matching rows across the two collections.
    pub primary_key: String,
    /// Field copied from right rows onto differing output rows.
    /// An empty name disables propagation, as `None` does.
    #[serde(
        default = "default_secondary_identifier",
        deserialize_with = "deserialize_field_name"
    )]
    pub secondary_identifier: Option<String>,
    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
}

fn default_secondary_identifier() -> Option<String> {
    Some(DEFAULT_SECONDARY_IDENTIFIER.to_string())
}

fn deserialize_field_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<String>::deserialize(deserializer)?;
    Ok(field.filter(|field| !field.is_empty()))
}

impl ReconcileOptions {
    /// Creates options with the given primary key and defaults elsewhere.
    pub fn new(primary_key: impl Into<String>) -> Self {
        ReconcileOptions {
            primary_key: primary_key.into(),
            secondary_identifier: default_secondary_identifier(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }

    /// Creates a new ReconcileOptionsBuilder.
    pub fn builder() -> ReconcileOptionsBuilder {
        ReconcileOptionsBuilder::new()
    }
}

/// ReconcileOptionsBuilder is a builder for ReconcileOptions.
#[derive(Debug, Clone)]
pub struct ReconcileOptionsBuilder {
    primary_key: Option<String>,
    secondary_identifier: Option<String>,
    duplicate_keys: DuplicateKeyPolicy,
}

impl Default for ReconcileOptionsBuilder {
    fn default() -> Self {
        ReconcileOptionsBuilder {
            primary_key: None,
            secondary_identifier: default_secondary_identifier(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

impl ReconcileOptionsBuilder {
    /// Creates a new ReconcileOptionsBuilder.
    pub fn new() -> Self {
        ReconcileOptionsBuilder::default()
    }

    /// Sets the primary key field name.
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Sets the secondary identifier field name.
    pub fn secondary_identifier(mut self, field: impl Into<String>) -> Self {
        self.secondary_identifier = Some(field.into());
        self
    }

    /// Disables secondary identifier propagation.
    pub fn no_secondary_identifier(mut self) -> Self {
        self.secondary_identifier = None;
        self
    }

    /// Sets the duplicate key policy.
    pub fn duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Builds the options. Fails when no non-empty primary key was given.
    pub fn build(self) -> Result<ReconcileOptions, ReconcileError> {
        let primary_key = self
            .primary_key
            .filter(|field| !field.is_empty())
            .ok_or(ReconcileError::MissingPrimaryKeyArgument)?;

        Ok(ReconcileOptions {
            primary_key,
            secondary_identifier: self.secondary_identifier.filter(|field| !field.is_empty()),
            duplicate_keys: self.duplicate_keys,
        })
    }
}
