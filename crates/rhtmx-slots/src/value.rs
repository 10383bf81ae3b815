// File: src/value.rs
// Purpose: Slot data values and typed conversions out of them

use std::collections::BTreeMap;
use std::fmt;

/// Data carried by slot arguments and slot content
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

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

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key on an object value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Truthiness used by templates
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(arr) => !arr.is_empty(),
            Value::Object(obj) => !obj.is_empty(),
            Value::Null => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                // Format number nicely (remove .0 for integers)
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => f.write_str(s),
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Object(_) => f.write_str("[Object]"),
            Value::Null => Ok(()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<maud::Markup> for Value {
    fn from(markup: maud::Markup) -> Self {
        Value::String(markup.into_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(arr: Vec<T>) -> Self {
        Value::Array(arr.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(obj: BTreeMap<String, Value>) -> Self {
        Value::Object(obj)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Conversion from a slot [`Value`] into a typed field.
///
/// The error string describes the mismatch; callers attach the argument name.
pub trait FromSlotValue: Sized {
    fn from_slot_value(value: Value) -> Result<Self, String>;
}

fn mismatch(expected: &str, value: &Value) -> String {
    format!("expected {}, got {}", expected, value.kind())
}

impl FromSlotValue for Value {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        Ok(value)
    }
}

impl FromSlotValue for String {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(_) | Value::Bool(_) => Ok(value.to_string()),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl FromSlotValue for bool {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromSlotValue for f64 {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(mismatch("number", &other)),
        }
    }
}

impl FromSlotValue for i64 {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&n) => {
                Ok(n as i64)
            }
            other => Err(mismatch("integer", &other)),
        }
    }
}

impl FromSlotValue for usize {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && (0.0..usize::MAX as f64).contains(&n) => {
                Ok(n as usize)
            }
            other => Err(mismatch("non-negative integer", &other)),
        }
    }
}

impl<T: FromSlotValue> FromSlotValue for Option<T> {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_slot_value(other).map(Some),
        }
    }
}

impl<T: FromSlotValue> FromSlotValue for Vec<T> {
    fn from_slot_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_slot_value).collect(),
            other => Err(mismatch("array", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_integers_without_fraction() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "label": "Home", "count": 2, "tags": ["a"] });
        let value = Value::from(json);
        assert_eq!(value.get("label"), Some(&Value::from("Home")));
        assert_eq!(value.get("count"), Some(&Value::Number(2.0)));
        assert_eq!(value.get("tags").and_then(Value::as_array).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_typed_conversion() {
        assert_eq!(i64::from_slot_value(Value::from(4)), Ok(4));
        assert!(i64::from_slot_value(Value::Number(4.5)).is_err());
        assert_eq!(Option::<String>::from_slot_value(Value::Null), Ok(None));
        assert_eq!(
            Vec::<String>::from_slot_value(Value::from(vec!["x", "y"])),
            Ok(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(
            bool::from_slot_value(Value::from("yes")),
            Err("expected bool, got string".to_string())
        );
    }

    #[test]
    fn test_out_of_range_integers_are_rejected() {
        assert_eq!(
            i64::from_slot_value(Value::Number(1e20)),
            Err("expected integer, got number".to_string())
        );
        assert!(i64::from_slot_value(Value::Number(-1e20)).is_err());
        assert!(i64::from_slot_value(Value::Number(f64::INFINITY)).is_err());
        assert_eq!(i64::from_slot_value(Value::Number(-42.0)), Ok(-42));
        assert!(usize::from_slot_value(Value::Number(1e30)).is_err());
        assert!(usize::from_slot_value(Value::Number(-1.0)).is_err());
        assert_eq!(usize::from_slot_value(Value::Number(7.0)), Ok(7));
    }
}
