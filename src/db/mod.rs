//! Database module - SQLite connection management and saved queries

mod config;
mod database;
pub mod handlers;
mod params;
mod row;
mod saved_query;
mod transaction;

pub use config::{DatabaseConfig, MEMORY_PATH};
pub use database::Database;
pub use handlers::RowHandler;
pub use params::{QueryValue, ValueType};
pub use row::{row_to_json, sqlite_to_json, sqlite_to_text};
pub use saved_query::{SavedQuery, SavedQueryBuilder};
