//! Dynamic parameter values.
//!
//! [`Value`] is the scalar currency of the composition API: every
//! parameter bound through a template ends up stored as a `Value` and
//! handed to `tokio-postgres` through its [`ToSql`] implementation.
//!
//! The [`Value::Array`] variant is not a scalar. It carries the
//! column-major arrays produced for `unnest` bindings and is rejected
//! when interleaved directly in a template.

use bytes::BytesMut;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A dynamically typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// `boolean`
    Bool(bool),
    /// Any integer wire type; narrowed to the declared parameter type at bind time
    Int(i64),
    /// `float4` / `float8`
    Float(f64),
    /// `text` / `varchar` / ...
    Text(String),
    /// `bytea`
    Bytes(Vec<u8>),
    /// `json` / `jsonb`
    Json(serde_json::Value),
    /// `timestamp`
    Timestamp(chrono::NaiveDateTime),
    /// A homogeneous array, bound as a single driver-level array parameter.
    ///
    /// Produced by the `unnest` fragment (one array per column). Not a
    /// scalar: interleaving an `Array` directly in a template is an error.
    Array(Vec<Value>),
}

impl Value {
    /// Whether this value can be bound as a single scalar parameter.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_))
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, out),
            // Narrow to the declared wire type; out-of-range values surface
            // the conversion error instead of truncating.
            Value::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::OID => u32::try_from(*v)?.to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::Array(items) => items.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The variant is only known at bind time; mismatches surface as
        // encoding errors from the delegated impl.
        true
    }

    to_sql_checked!();
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(v: chrono::NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
