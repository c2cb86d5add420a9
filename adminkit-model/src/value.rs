use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A flat, insertion-ordered field → value map.
///
/// Used for raw request data, coerced data, stored records and the
/// field map carried by an [`crate::Entity`].
pub type Record = IndexMap<String, Value>;

/// A single field value.
///
/// Serializes untagged, so a `Record` maps 1:1 onto a flat JSON object.
/// `Float` only appears in raw input and validator bounds; schema
/// coercion never produces it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

const TRUTHY_STRINGS: [&str; 4] = ["1", "true", "yes", "on"];

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the value: integers, floats and numeric strings.
    ///
    /// Booleans and null are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Value::Null | Value::Bool(_) => None,
        }
    }

    /// Whether the value counts as "set" in a boolean context.
    ///
    /// `Null`, `false`, `0`, `0.0`, `""` and `"0"` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Casts to text. `true` becomes `"1"`, `false` and `Null` become `""`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }

    /// Casts to an integer.
    ///
    /// Strings are trimmed and parsed as an integer, then as a finite
    /// float truncated toward zero. Anything that does not parse as a
    /// whole number (including `"12abc"`) becomes `0`.
    pub fn to_integer(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::Float(f) => truncate(*f),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(truncate))
                    .unwrap_or(0)
            }
        }
    }

    /// Casts to a boolean.
    ///
    /// Strings are compared case-insensitively against `1`, `true`, `yes`
    /// and `on`; every other string is `false`.
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::String(s) => {
                let lowered = s.to_lowercase();
                TRUTHY_STRINGS.contains(&lowered.as_str())
            }
            Value::Null => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
        }
    }
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        // `as` saturates at the i64 bounds.
        f.trunc() as i64
    } else {
        0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
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

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
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
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
