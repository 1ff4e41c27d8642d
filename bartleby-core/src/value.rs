//! Value types for SQL parameters

use serde::{Deserialize, Serialize};

/// A SQL value that can be bound as a statement parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// String value
    String(String),
    /// Bytes value
    Bytes(Vec<u8>),
    /// JSON value
    Json(serde_json::Value),
    /// Array of values
    Array(Vec<Value>),
    /// UUID value
    #[cfg(feature = "uuid-support")]
    Uuid(uuid::Uuid),
    /// UTC timestamp value
    #[cfg(feature = "datetime-support")]
    DateTime(chrono::DateTime<chrono::Utc>),
    /// Arbitrary-precision decimal value
    #[cfg(feature = "decimal-support")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the SQL type name for this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::I32(_) => "INTEGER",
            Value::I64(_) => "BIGINT",
            Value::F32(_) => "REAL",
            Value::F64(_) => "DOUBLE PRECISION",
            Value::String(_) => "TEXT",
            Value::Bytes(_) => "BYTEA",
            Value::Json(_) => "JSON",
            Value::Array(_) => "ARRAY",
            #[cfg(feature = "uuid-support")]
            Value::Uuid(_) => "UUID",
            #[cfg(feature = "datetime-support")]
            Value::DateTime(_) => "TIMESTAMPTZ",
            #[cfg(feature = "decimal-support")]
            Value::Decimal(_) => "NUMERIC",
        }
    }

    /// Extract array values if this is an Array variant
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Coerce this value to the text form used for UPDATE assignments.
    ///
    /// Null passes through, structured values serialize to canonical JSON
    /// text, scalars become their display text. Strings and raw bytes are
    /// already in their final form.
    pub fn coerce_text(self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::String(b.to_string()),
            Value::I32(v) => Value::String(v.to_string()),
            Value::I64(v) => Value::String(v.to_string()),
            Value::F32(v) => Value::String(v.to_string()),
            Value::F64(v) => Value::String(v.to_string()),
            Value::String(s) => Value::String(s),
            Value::Bytes(b) => Value::Bytes(b),
            Value::Json(v) => Value::String(v.to_string()),
            Value::Array(vs) => {
                let json = serde_json::Value::Array(vs.iter().map(Value::json_repr).collect());
                Value::String(json.to_string())
            }
            #[cfg(feature = "uuid-support")]
            Value::Uuid(u) => Value::String(u.to_string()),
            #[cfg(feature = "datetime-support")]
            Value::DateTime(dt) => Value::String(dt.to_rfc3339()),
            #[cfg(feature = "decimal-support")]
            Value::Decimal(d) => Value::String(d.to_string()),
        }
    }

    /// Plain JSON representation, used when arrays serialize to text
    fn json_repr(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::from(*b),
            Value::I32(v) => serde_json::Value::from(*v),
            Value::I64(v) => serde_json::Value::from(*v),
            Value::F32(v) => serde_json::Value::from(*v as f64),
            Value::F64(v) => serde_json::Value::from(*v),
            Value::String(s) => serde_json::Value::from(s.clone()),
            Value::Bytes(b) => serde_json::Value::from(b.clone()),
            Value::Json(v) => v.clone(),
            Value::Array(vs) => {
                serde_json::Value::Array(vs.iter().map(Value::json_repr).collect())
            }
            #[cfg(feature = "uuid-support")]
            Value::Uuid(u) => serde_json::Value::from(u.to_string()),
            #[cfg(feature = "datetime-support")]
            Value::DateTime(dt) => serde_json::Value::from(dt.to_rfc3339()),
            #[cfg(feature = "decimal-support")]
            Value::Decimal(d) => serde_json::Value::from(d.to_string()),
        }
    }
}

// Implement From for common types
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::I32(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::I64(val)
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::F32(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::F64(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::Bytes(val)
    }
}

impl From<serde_json::Value> for Value {
    fn from(val: serde_json::Value) -> Self {
        Value::Json(val)
    }
}

#[cfg(feature = "uuid-support")]
impl From<uuid::Uuid> for Value {
    fn from(val: uuid::Uuid) -> Self {
        Value::Uuid(val)
    }
}

#[cfg(feature = "datetime-support")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        Value::DateTime(val)
    }
}

#[cfg(feature = "decimal-support")]
impl From<rust_decimal::Decimal> for Value {
    fn from(val: rust_decimal::Decimal) -> Self {
        Value::Decimal(val)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(vals: Vec<T>) -> Self {
        Value::Array(vals.into_iter().map(|v| v.into()).collect())
    }
}

impl<T> From<&[T]> for Value
where
    T: Clone + Into<Value>,
{
    fn from(vals: &[T]) -> Self {
        Value::Array(vals.iter().cloned().map(|v| v.into()).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        assert_eq!(Value::from(42i32), Value::I32(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn test_array_conversion() {
        let arr = vec![1, 2, 3];
        let value = Value::from(arr);
        assert_eq!(
            value,
            Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)])
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(Some(42i32)), Value::I32(42));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::I32(42).is_null());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::I32(42).type_name(), "INTEGER");
        assert_eq!(Value::String("test".to_string()).type_name(), "TEXT");
        assert_eq!(Value::Bool(true).type_name(), "BOOLEAN");
        assert_eq!(Value::Null.type_name(), "NULL");
    }

    #[test]
    fn test_coerce_text_null_passes_through() {
        assert_eq!(Value::Null.coerce_text(), Value::Null);
    }

    #[test]
    fn test_coerce_text_scalars() {
        assert_eq!(Value::I32(30).coerce_text(), Value::String("30".to_string()));
        assert_eq!(
            Value::Bool(true).coerce_text(),
            Value::String("true".to_string())
        );
        assert_eq!(
            Value::String("Bob".to_string()).coerce_text(),
            Value::String("Bob".to_string())
        );
    }

    #[test]
    fn test_coerce_text_json() {
        let json = serde_json::json!({"theme": "dark"});
        assert_eq!(
            Value::Json(json).coerce_text(),
            Value::String("{\"theme\":\"dark\"}".to_string())
        );
    }

    #[test]
    fn test_coerce_text_array() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(value.coerce_text(), Value::String("[1,2,3]".to_string()));
    }
}
