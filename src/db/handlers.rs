//! Row handlers - turn a result cursor into a [`QueryResultBuilder`]
//!
//! A handler walks the [`Rows`] it is given and records what it finds with
//! `set_value`/`add_value`. The caller freezes the builder afterwards.

use std::sync::Arc;

use rusqlite::Rows;
use serde_json::Value;

use crate::db::row::{row_to_json, sqlite_to_text};
use crate::models::QueryResultBuilder;

/// Shared row handler producing values of type `T`.
pub type RowHandler<T> =
    Arc<dyn Fn(&mut Rows<'_>) -> rusqlite::Result<QueryResultBuilder<T>> + Send + Sync>;

/// Wrap a closure as a [`RowHandler`].
pub fn handler<T, F>(f: F) -> RowHandler<T>
where
    F: Fn(&mut Rows<'_>) -> rusqlite::Result<QueryResultBuilder<T>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Every row as a JSON object keyed by column name.
pub fn json_rows() -> RowHandler<Value> {
    handler(|rows| {
        let mut result = QueryResultBuilder::new();
        while let Some(row) = rows.next()? {
            result.add_value(row_to_json(row)?);
        }
        Ok(result)
    })
}

/// First column of the first row as the single value.
pub fn single_i64() -> RowHandler<i64> {
    handler(|rows| {
        let mut result = QueryResultBuilder::new();
        if let Some(row) = rows.next()? {
            result.set_value(row.get(0)?);
        }
        Ok(result)
    })
}

/// First column of the first row, read as text, as the single value.
pub fn single_text() -> RowHandler<String> {
    handler(|rows| {
        let mut result = QueryResultBuilder::new();
        if let Some(row) = rows.next()? {
            result.set_value(sqlite_to_text(row, 0)?);
        }
        Ok(result)
    })
}

/// Handler applied to generated-key cursors when a query has none of its
/// own: one text row value per generated key.
pub fn generated_ids() -> RowHandler<String> {
    handler(|rows| {
        let mut result = QueryResultBuilder::new();
        while let Some(row) = rows.next()? {
            result.add_value(sqlite_to_text(row, 0)?);
        }
        Ok(result)
    })
}
