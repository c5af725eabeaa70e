//! Connection settings applied when a [`Database`](super::Database) opens

use std::time::Duration;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Path token for a private, non-persistent database.
pub const MEMORY_PATH: &str = ":memory:";

/// Options for opening a database file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// File path, or [`MEMORY_PATH`].
    pub path: String,
    /// Enforce foreign key constraints.
    pub foreign_keys: bool,
    /// `PRAGMA journal_mode` value, e.g. `"WAL"`. Engine default when unset.
    pub journal_mode: Option<String>,
    /// How long to wait on a locked database before failing.
    pub busy_timeout_ms: Option<u64>,
    /// Minimum size of the prepared statement cache.
    pub statement_cache_capacity: usize,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<String>) -> Self {
        DatabaseConfig {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    pub(crate) fn apply(&self, conn: &Connection) -> rusqlite::Result<()> {
        let foreign_keys = if self.foreign_keys { "ON" } else { "OFF" };
        conn.execute_batch(&format!("PRAGMA foreign_keys = {};", foreign_keys))?;
        if let Some(mode) = &self.journal_mode {
            conn.execute_batch(&format!("PRAGMA journal_mode = {};", mode))?;
        }
        if let Some(ms) = self.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))?;
        }
        conn.set_prepared_statement_cache_capacity(self.statement_cache_capacity);
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: MEMORY_PATH.to_string(),
            foreign_keys: true,
            journal_mode: None,
            busy_timeout_ms: None,
            statement_cache_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::default();
        assert!(config.is_in_memory());
        assert!(config.foreign_keys);
        assert_eq!(config.statement_cache_capacity, 64);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"path": "app.db", "journal_mode": "WAL"}"#).unwrap();
        assert_eq!(config.path, "app.db");
        assert_eq!(config.journal_mode.as_deref(), Some("WAL"));
        assert!(config.foreign_keys);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_apply_to_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let config = DatabaseConfig {
            busy_timeout_ms: Some(250),
            ..DatabaseConfig::default()
        };
        config.apply(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
