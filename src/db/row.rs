//! Row module - utilities for converting SQLite rows to JSON values and text

use base64::Engine;
use rusqlite::types::ValueRef;
use rusqlite::{Row, Statement};
use serde_json::{Map, Number, Value};

/// Convert SQLite row to JSON value with proper type handling
///
/// # Arguments
/// * `row` - Reference to the SQLite row
/// * `i` - Column index
///
/// # Returns
/// JSON value representing the SQLite column value
pub fn sqlite_to_json(row: &Row<'_>, i: usize) -> rusqlite::Result<Value> {
    Ok(match row.get_ref(i)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(base64::engine::general_purpose::STANDARD.encode(b)),
    })
}

/// Convert a whole row to a JSON object keyed by column name
pub fn row_to_json(row: &Row<'_>) -> rusqlite::Result<Value> {
    let stmt: &Statement<'_> = row.as_ref();
    let mut map = Map::new();
    for (i, name) in stmt.column_names().into_iter().enumerate() {
        map.insert(name.to_string(), sqlite_to_json(row, i)?);
    }
    Ok(Value::Object(map))
}

/// Read a column as text whatever its storage class; NULL reads as empty
pub fn sqlite_to_text(row: &Row<'_>, i: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(i)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => base64::engine::general_purpose::STANDARD.encode(b),
    })
}
