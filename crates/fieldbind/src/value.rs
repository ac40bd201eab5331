//! Value classification
//!
//! Decides how a JSON value is projected: nothing, a scalar write, a
//! recursion, or a list render.

use serde_json::{Map, Value};

/// Flat item-key to value mapping (one list row, or a parsed form)
pub type Record = Map<String, Value>;

/// Classified view of a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundValue<'a> {
    /// null, `{}` or `[]`
    Empty,
    /// string, number or bool
    Scalar(&'a Value),
    Nested(&'a Map<String, Value>),
    List(&'a [Value]),
}

impl<'a> BoundValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        if is_empty(value) {
            return Self::Empty;
        }
        match value {
            Value::Object(map) => Self::Nested(map),
            Value::Array(items) => Self::List(items),
            other => Self::Scalar(other),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Scalar(_) => "scalar",
            Self::Nested(_) => "nested",
            Self::List(_) => "list",
        }
    }
}

/// null, an empty object, or an empty array
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Display text of a value
///
/// Integral numbers drop the fraction and null is the empty string.
/// Containers fall back to their JSON text.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

/// Truthiness: `""`, `0`, `false` and null are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
