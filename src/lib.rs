//! Fluent SQL statement builders and a SQLite connection manager that runs
//! named, prepared queries through pluggable row handlers.
//!
//! ```no_run
//! use sqlite_kit::{handlers, Database, QueryBuilder, QueryValue, SavedQuery, Select};
//!
//! # fn main() -> sqlite_kit::Result<()> {
//! let mut db = Database::new("app.db");
//! db.open()?;
//! db.save_query(
//!     SavedQuery::builder()
//!         .name("user_by_id")
//!         .query(Select::new().columns(["id", "name"]).table_name("users").where_clause("id = ?"))
//!         .row_handler(handlers::json_rows())
//!         .build()?,
//! );
//! db.prepare_queries(&["user_by_id"])?;
//! let users = db.execute_saved_query::<serde_json::Value>("user_by_id", &[QueryValue::integer(1)])?;
//! # let _ = users;
//! db.close()?;
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod db;
mod error;
mod models;
pub mod schema;

pub use builders::{
    Column, CreateTable, Delete, DropTable, Insert, JoinType, QueryBuilder, Select, SqlSource,
    SqlValue, Update,
};
pub use db::{
    handlers, Database, DatabaseConfig, QueryValue, RowHandler, SavedQuery, SavedQueryBuilder,
    ValueType, MEMORY_PATH,
};
pub use error::{Error, Result};
pub use models::{QueryResult, QueryResultBuilder};
pub use schema::SqliteType;

/// Version of the bundled SQLite engine.
pub fn sqlite_version() -> &'static str {
    rusqlite::version()
}
