//! Scalar field values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value is the content of a single row field.
///
/// Rows are flat records, so only scalars are representable. Integers and
/// floats compare numerically with each other, and only when the float holds
/// exactly that integer; no other cross-type equality exists.
///
/// `UInt` holds integers above `i64::MAX`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for the empty string. Null is not blank until normalized.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Returns the value with null replaced by the empty string.
    pub fn normalized(&self) -> Value {
        match self {
            Value::Null => Value::String(String::new()),
            other => other.clone(),
        }
    }

    /// Compares two values as they would compare after normalization,
    /// without allocating the normalized copies.
    pub fn normalized_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            _ => self == other,
        }
    }

    /// Returns the stringified form used to match primary keys across
    /// collections, or `None` for null.
    ///
    /// `Int(1)`, `Float(1.0)` and `String("1")` all yield `"1"`.
    pub fn key_string(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Truthiness: non-empty strings, non-zero numbers and `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::UInt(u) => *u != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Coerces the value to an integer the way a lenient text field would be
    /// read: floats truncate, booleans are 0/1, strings must hold a decimal
    /// integer (surrounding whitespace allowed).
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::Float(_) => None,
            Value::String(s) => s.trim().parse().ok(),
        }
    }

    /// Converts a JSON value. Returns `None` for arrays and objects.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_eq_float(i128::from(*a), *b)
            }
            (Value::UInt(a), Value::Float(b)) | (Value::Float(b), Value::UInt(a)) => {
                int_eq_float(i128::from(*a), *b)
            }
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact integer/float equality: the float must be integral and hold the
/// same integer. Both integer variants fit in (-2^64, 2^64).
fn int_eq_float(int: i128, float: f64) -> bool {
    const LIMIT: f64 = 18446744073709551616.0;
    float.fract() == 0.0 && float > -LIMIT && float < LIMIT && float as i128 == int
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(u),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
