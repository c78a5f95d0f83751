//! Core type definitions
//!
//! `Value` is the closed set of inputs the encoder understands. Native Rust
//! values convert into it through `From`, and anything `Serialize` can be
//! turned into one with [`to_value`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone as _, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;

// ============================================================================
// Raw fragments and custom stringification
// ============================================================================

/// Pre-escaped SQL fragment, rendered exactly as given
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// The SQL text this fragment renders as
    pub fn to_sql_string(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap trusted SQL text so it is inserted without escaping
///
/// # Example
/// ```
/// use sqlstring::{escape, raw, EscapeOptions};
///
/// let sql = escape(&raw("NOW()"), &EscapeOptions::default()).unwrap();
/// assert_eq!(sql, "NOW()");
/// ```
pub fn raw(sql: impl Into<String>) -> Value {
    Value::Raw(Raw::new(sql))
}

/// Custom conversion hook for types that know how to present themselves to SQL
///
/// The encoder calls `to_sql` and escapes whatever it returns, so an
/// implementation can return `Value::Raw` to emit SQL verbatim or any other
/// value to have it escaped normally.
pub trait SqlStringify: fmt::Debug + Send + Sync {
    fn to_sql(&self) -> Value;
}

// ============================================================================
// Value
// ============================================================================

/// A value that can be rendered as SQL text
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// `NULL`
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// May be non-finite; `NaN` and the infinities render as quoted strings
    Float(f64),
    Decimal(Decimal),
    Text(String),
    /// Binary data, rendered as a hex literal
    Bytes(Vec<u8>),
    /// Point in time, rendered in the configured time zone
    Date(DateTime<Utc>),
    /// Comma list; nested lists render as parenthesized tuples
    List(Vec<Value>),
    /// Ordered mapping, rendered as `` `key` = value `` pairs
    Map(IndexMap<String, Value>),
    Raw(Raw),
    Custom(Arc<dyn SqlStringify>),
}

impl Value {
    /// Wrap a custom stringification hook
    pub fn custom(hook: impl SqlStringify + 'static) -> Self {
        Value::Custom(Arc::new(hook))
    }

    /// Build a `Bytes` value
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Build a `List` value from anything convertible
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Map` value, keeping the iteration order of `entries`
    pub fn map<K: Into<String>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Raw(a), Value::Raw(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from!(Bool: bool);
impl_from!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from!(UInt: u64);
impl_from!(Float: f64);
impl_from!(Decimal: Decimal);
impl_from!(Text: String, &str, char);
impl_from!(Date: DateTime<Utc>);
impl_from!(Raw: Raw);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        // Widening directly would expose binary noise (0.1 -> 0.10000000149011612)
        Value::Float(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(Utc.from_utc_datetime(&value))
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Text(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Convert any serializable value into a `Value`
///
/// Structs become ordered mappings (field declaration order), sequences become
/// lists. Useful for turning a row struct into a `SET` clause.
///
/// # Example
/// ```
/// use serde::Serialize;
/// use sqlstring::{format, to_value, EscapeOptions, Value};
///
/// #[derive(Serialize)]
/// struct Update { name: String, age: u32 }
///
/// let row = to_value(&Update { name: "bob".into(), age: 42 }).unwrap();
/// let sql = format("UPDATE users SET ?", &Value::list([row]), &EscapeOptions::default()).unwrap();
/// assert_eq!(sql, "UPDATE users SET `name` = 'bob', `age` = 42");
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point(i32, i32);

    impl SqlStringify for Point {
        fn to_sql(&self) -> Value {
            raw(format!("POINT({}, {})", self.0, self.1))
        }
    }

    // =========================================================================
    // Native Conversion Tests
    // =========================================================================

    #[test]
    fn test_from_scalars() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from("abc"), Value::Text("abc".to_string()));
        assert_eq!(Value::from('x'), Value::Text("x".to_string()));
    }

    #[test]
    fn test_from_f32_keeps_source_precision() {
        assert_eq!(Value::from(0.1f32), Value::Float(0.1));
        assert_eq!(Value::from(-3.25f32), Value::Float(-3.25));
        assert!(matches!(Value::from(f32::NAN), Value::Float(n) if n.is_nan()));
        assert_eq!(Value::from(f32::INFINITY), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_from_vec_and_array() {
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(Value::from(["a"]), Value::List(vec![Value::from("a")]));
    }

    #[test]
    fn test_from_byte_slice() {
        let bytes: &[u8] = &[0xde, 0xad];
        assert_eq!(Value::from(bytes), Value::Bytes(vec![0xde, 0xad]));
    }

    #[test]
    fn test_from_uuid_is_text() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(Value::from(id), Value::Text(id.to_string()));
    }

    #[test]
    fn test_from_naive_datetime_is_utc() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        match Value::from(naive) {
            Value::Date(dt) => assert_eq!(dt.naive_utc(), naive),
            other => panic!("expected date, got {:?}", other),
        }
    }

    #[test]
    fn test_map_keeps_order() {
        let value = Value::map([("z", 1), ("a", 2)]);
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    // =========================================================================
    // JSON Conversion Tests
    // =========================================================================

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(serde_json::json!(-3)), Value::Int(-3));
        assert_eq!(Value::from(serde_json::json!(u64::MAX)), Value::UInt(u64::MAX));
        assert_eq!(Value::from(serde_json::json!(2.5)), Value::Float(2.5));
    }

    #[test]
    fn test_from_json_object_preserves_order() {
        let value = Value::from(serde_json::json!({"b": 1, "a": [true, null]}));
        assert_eq!(
            value,
            Value::map([
                ("b", Value::Int(1)),
                ("a", Value::List(vec![Value::Bool(true), Value::Null])),
            ])
        );
    }

    #[test]
    fn test_to_value_struct() {
        #[derive(Serialize)]
        struct Row {
            id: i64,
            name: Option<String>,
        }

        let value = to_value(&Row { id: 1, name: None }).unwrap();
        assert_eq!(value, Value::map([("id", Value::Int(1)), ("name", Value::Null)]));
    }

    // =========================================================================
    // Raw and Custom Tests
    // =========================================================================

    #[test]
    fn test_raw_constructor() {
        let value = raw("NOW()");
        match value {
            Value::Raw(r) => assert_eq!(r.to_sql_string(), "NOW()"),
            other => panic!("expected raw, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_equality_is_identity() {
        let a = Value::custom(Point(1, 2));
        let b = a.clone();
        let c = Value::custom(Point(1, 2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(vec![1]).as_list().map(|l| l.len()), Some(1));
        assert!(Value::from(1).as_list().is_none());
    }
}
