//! Params module - typed values bound positionally into prepared statements

use std::fmt;

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// Tag of a [`QueryValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Real,
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Integer => "INTEGER",
            ValueType::Real => "REAL",
            ValueType::Text => "TEXT",
        })
    }
}

/// A scalar tagged with the SQL type it is bound as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl QueryValue {
    pub fn integer(value: impl Into<i64>) -> Self {
        QueryValue::Integer(value.into())
    }

    pub fn real(value: impl Into<f64>) -> Self {
        QueryValue::Real(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        QueryValue::Text(value.into())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            QueryValue::Integer(_) => ValueType::Integer,
            QueryValue::Real(_) => ValueType::Real,
            QueryValue::Text(_) => ValueType::Text,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QueryValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl ToSql for QueryValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            QueryValue::Integer(v) => ToSqlOutput::from(*v),
            QueryValue::Real(v) => ToSqlOutput::from(*v),
            QueryValue::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Integer(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        QueryValue::Integer(v.into())
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Real(v)
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Text(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Text(v.to_string())
    }
}

/// Convenience macro for building positional value lists.
///
/// Usage: `query_values![1, 2.5, "text"]`
#[macro_export]
macro_rules! query_values {
    ($($val:expr),* $(,)?) => {
        &[$($crate::QueryValue::from($val)),*][..]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_tag_values() {
        assert_eq!(QueryValue::integer(3).value_type(), ValueType::Integer);
        assert_eq!(QueryValue::real(1.5).value_type(), ValueType::Real);
        assert_eq!(QueryValue::text("a").value_type(), ValueType::Text);
    }

    #[test]
    fn test_accessors_match_tag() {
        let value = QueryValue::integer(9_i64);
        assert_eq!(value.as_i64(), Some(9));
        assert_eq!(value.as_f64(), None);
        assert_eq!(QueryValue::text("x").as_str(), Some("x"));
    }

    #[test]
    fn test_macro_builds_slice() {
        let values: &[QueryValue] = crate::query_values![1, 2.5, "t"];
        assert_eq!(
            values,
            &[
                QueryValue::Integer(1),
                QueryValue::Real(2.5),
                QueryValue::Text("t".to_string())
            ]
        );
    }

    #[test]
    fn test_to_sql_dispatches_on_tag() {
        use rusqlite::types::Value;

        let owned = |v: &QueryValue| match v.to_sql().unwrap() {
            ToSqlOutput::Owned(value) => value,
            ToSqlOutput::Borrowed(value) => value.into(),
            _ => panic!("unexpected output"),
        };
        assert_eq!(owned(&QueryValue::integer(4)), Value::Integer(4));
        assert_eq!(owned(&QueryValue::real(0.5)), Value::Real(0.5));
        assert_eq!(owned(&QueryValue::text("s")), Value::Text("s".to_string()));
    }
}
