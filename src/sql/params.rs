//! Convert serde_json::Value to types that sqlx can bind to SQLite.

use crate::config::FieldType;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::Database;

/// A value that can be bound to a SQLite statement. Converts from serde_json::Value.
#[derive(Clone, Debug, PartialEq)]
pub enum SqliteBindValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqliteBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => SqliteBindValue::Null,
            Value::Bool(b) => SqliteBindValue::Integer(i64::from(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqliteBindValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    SqliteBindValue::Real(f)
                } else {
                    SqliteBindValue::Text(n.to_string())
                }
            }
            Value::String(s) => SqliteBindValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => SqliteBindValue::Text(v.to_string()),
        }
    }
}

/// Shape a request value for the column it is written to.
/// TEXT/BLOB columns receive text for any non-null scalar; numeric columns keep numbers
/// and turn booleans into 1/0. Anything else is left for SQLite's column affinity.
pub fn coerce_for_field(type_: FieldType, v: &Value) -> Value {
    match (type_.is_textual(), v) {
        (_, Value::Null) => Value::Null,
        (true, Value::String(_)) => v.clone(),
        (true, Value::Number(n)) => Value::String(n.to_string()),
        (true, Value::Bool(b)) => Value::String(b.to_string()),
        (true, other) => Value::String(other.to_string()),
        (false, Value::Bool(b)) => Value::from(i64::from(*b)),
        (false, other) => other.clone(),
    }
}

impl<'q> Encode<'q, Sqlite> for SqliteBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqliteBindValue::Null => <Option<i64> as Encode<Sqlite>>::encode_by_ref(&None, buf),
            SqliteBindValue::Integer(n) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            SqliteBindValue::Real(n) => <f64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            SqliteBindValue::Text(s) => <String as Encode<Sqlite>>::encode_by_ref(s, buf),
        }
    }
}

impl sqlx::Type<Sqlite> for SqliteBindValue {
    fn type_info() -> SqliteTypeInfo {
        <String as sqlx::Type<Sqlite>>::type_info()
    }
}
