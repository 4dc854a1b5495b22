//! Bound parameter values and their coarse kind classification.
//!
//! Every parameter bound by a builder and every cell read from a row cursor
//! is a [`Value`]. The variant itself is the classification, so there is no
//! runtime type inspection anywhere: a record definition declares a
//! [`ValueKind`] per field once, and scanning coerces raw values through
//! [`ValueKind::coerce`] before assignment.

use serde::Serialize;

/// An opaque bound value.
///
/// `Other` carries values outside the core scalar set in string form; reads
/// and writes of such fields go through `ToString`/`From<String>`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`NULL`)
    Null,
    /// Text value
    Text(String),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Any other value, carried in string form
    Other(String),
}

/// Coarse classification of a [`Value`], declared per record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    /// Text
    Text,
    /// 64-bit integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// String-shaped fallback for everything else
    Other,
}

impl Value {
    /// The kind of this value. `Null` reports as `Other`.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null | Value::Other(_) => ValueKind::Other,
        }
    }

    /// True for the "omit this filter" sentinels: `Null` and the empty string.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True when this value is its kind's zero value.
    ///
    /// Broader than [`is_absent`](Value::is_absent): zero integers, zero
    /// floats, and `false` count as default. Used to pick the "not-empty"
    /// field subset for sparse INSERT/UPDATE statements.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) | Value::Other(s) => s.is_empty(),
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Bool(b) => !b,
        }
    }

    /// Text form of this value. `Null` renders as the empty string.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) | Value::Other(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }

    /// Integer form, if this value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float form. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Boolean form, if this value is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            other => f.write_str(&other.as_text()),
        }
    }
}

impl ValueKind {
    /// Coerce a raw stored value into this kind.
    ///
    /// `Null` passes through untouched so defaulted fields stay at their
    /// zero value. A value that cannot be converted collapses to the kind's
    /// zero value rather than failing (mismatches degrade silently).
    pub fn coerce(self, raw: Value) -> Value {
        if matches!(raw, Value::Null) {
            return Value::Null;
        }
        match self {
            ValueKind::Text => Value::Text(raw.as_text()),
            ValueKind::Int => Value::Int(raw.as_i64().unwrap_or_default()),
            ValueKind::Float => Value::Float(raw.as_f64().unwrap_or_default()),
            ValueKind::Bool => Value::Bool(raw.as_bool().unwrap_or_default()),
            ValueKind::Other => Value::Other(raw.as_text()),
        }
    }
}

// ==================== Conversions into Value ====================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i16> for Value {
    fn from(i: i16) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i8> for Value {
    fn from(i: i8) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u8> for Value {
    fn from(i: u8) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// ==================== serde_json interop ====================

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Text(s) | Value::Other(s) => serde_json::Value::String(s),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Value::from(f),
            Value::Bool(b) => serde_json::Value::Bool(b),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            // Arrays and objects ride the string-shaped fallback.
            other => Value::Other(other.to_string()),
        }
    }
}

// ==================== Assignment into record fields ====================

/// Conversion from a coerced [`Value`] into a concrete field type.
///
/// Implementations are lossy by contract: a variant mismatch yields the
/// type's default rather than an error, mirroring how unmatched result
/// columns leave fields at their zero value.
pub trait FromValue: Sized {
    /// Convert a value into `Self`.
    fn from_value(value: Value) -> Self;
}

impl FromValue for String {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => String::new(),
            other => other.as_text(),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default()
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as i32
    }
}

impl FromValue for i16 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as i16
    }
}

impl FromValue for i8 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as i8
    }
}

impl FromValue for u8 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as u8
    }
}

impl FromValue for u16 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as u16
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default() as u32
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Self {
        value.as_f64().unwrap_or_default()
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Self {
        value.as_f64().unwrap_or_default() as f32
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Self {
        value.as_bool().unwrap_or_default()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => None,
            other => Some(T::from_value(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert_eq!(Value::Text("x".into()).kind(), ValueKind::Text);
        assert_eq!(Value::Int(1).kind(), ValueKind::Int);
        assert_eq!(Value::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Other("raw".into()).kind(), ValueKind::Other);
        assert_eq!(Value::Null.kind(), ValueKind::Other);
    }

    #[test]
    fn absent_sentinels() {
        assert!(Value::Null.is_absent());
        assert!(Value::Text(String::new()).is_absent());
        assert!(!Value::Text("x".into()).is_absent());
        assert!(!Value::Int(0).is_absent());
        assert!(!Value::Bool(false).is_absent());
    }

    #[test]
    fn default_detection() {
        assert!(Value::Int(0).is_default());
        assert!(Value::Bool(false).is_default());
        assert!(Value::Float(0.0).is_default());
        assert!(!Value::Int(1).is_default());
        assert!(!Value::Text("x".into()).is_default());
    }

    #[test]
    fn coerce_preserves_null() {
        assert_eq!(ValueKind::Int.coerce(Value::Null), Value::Null);
        assert_eq!(ValueKind::Text.coerce(Value::Null), Value::Null);
    }

    #[test]
    fn coerce_other_falls_back_to_string() {
        assert_eq!(
            ValueKind::Other.coerce(Value::Int(7)),
            Value::Other("7".into())
        );
    }

    #[test]
    fn coerce_mismatch_degrades_to_zero() {
        assert_eq!(ValueKind::Int.coerce(Value::Text("abc".into())), Value::Int(0));
        assert_eq!(ValueKind::Bool.coerce(Value::Int(1)), Value::Bool(false));
    }

    #[test]
    fn option_from_impls() {
        let some: Option<&str> = Some("x");
        let none: Option<&str> = None;
        assert_eq!(Value::from(some), Value::Text("x".into()));
        assert_eq!(Value::from(none), Value::Null);
    }

    #[test]
    fn from_value_assignments() {
        assert_eq!(String::from_value(Value::Text("a".into())), "a");
        assert_eq!(i64::from_value(Value::Int(5)), 5);
        assert_eq!(f64::from_value(Value::Int(2)), 2.0);
        assert_eq!(bool::from_value(Value::Bool(true)), true);
        assert_eq!(Option::<i64>::from_value(Value::Null), None);
        assert_eq!(Option::<i64>::from_value(Value::Int(9)), Some(9));
    }

    #[test]
    fn json_round_trip_scalars() {
        let v = Value::from(serde_json::json!(42));
        assert_eq!(v, Value::Int(42));
        assert_eq!(serde_json::Value::from(v), serde_json::json!(42));

        let arr = Value::from(serde_json::json!([1, 2]));
        assert_eq!(arr, Value::Other("[1,2]".into()));
    }
}
