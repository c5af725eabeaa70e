//! Database module - owns the SQLite connection, saved queries and their
//! prepared statements

use std::collections::HashMap;

use rusqlite::{params_from_iter, Connection, Rows};
use tracing::{debug, trace, warn};

use crate::builders::SqlSource;
use crate::db::config::DatabaseConfig;
use crate::db::handlers::{self, RowHandler};
use crate::db::params::QueryValue;
use crate::db::row::sqlite_to_text;
use crate::db::saved_query::SavedQuery;
use crate::db::transaction::recover;
use crate::error::{Error, Result};
use crate::models::{QueryResult, QueryResultBuilder};

/// Cursor over the rowid of the most recent successful INSERT, provided the
/// last statement changed at least one row. An UPDATE or DELETE that changes
/// rows does not reset that rowid, so it reports the key of an earlier
/// INSERT on the same connection.
const GENERATED_KEYS_SQL: &str = "SELECT last_insert_rowid() AS id WHERE changes() > 0;";

/// A saved query compiled on the live connection. The compiled handle lives
/// in the connection's statement cache, keyed by its SQL text.
#[derive(Debug, Clone)]
struct PreparedQuery {
    sql: String,
    returns_generated_ids: bool,
}

/// Database connection struct - one SQLite connection plus a registry of
/// named queries.
///
/// Not `Sync`: confine each instance to one thread, or guard it with a mutex.
pub struct Database {
    config: DatabaseConfig,
    conn: Option<Connection>,
    saved_queries: HashMap<String, SavedQuery>,
    prepared: HashMap<String, PreparedQuery>,
    cache_capacity: usize,
    pub(crate) auto_commit: bool,
}

impl Database {
    /// Create a closed database for `path`; `":memory:"` selects an
    /// in-memory instance.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_config(DatabaseConfig::new(path))
    }

    pub fn in_memory() -> Self {
        Self::with_config(DatabaseConfig::default())
    }

    pub fn with_config(config: DatabaseConfig) -> Self {
        Database {
            cache_capacity: config.statement_cache_capacity,
            config,
            conn: None,
            saved_queries: HashMap::new(),
            prepared: HashMap::new(),
            auto_commit: true,
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    // ========================================
    // Lifecycle
    // ========================================

    pub fn open(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Err(Error::AlreadyConnected);
        }

        let connection_error = |source| Error::Connection {
            path: self.config.path.clone(),
            source,
        };
        let conn = if self.config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&self.config.path)
        }
        .map_err(connection_error)?;
        self.config.apply(&conn).map_err(connection_error)?;

        debug!(path = %self.config.path, "opened database");
        self.cache_capacity = self.config.statement_cache_capacity;
        self.auto_commit = true;
        self.conn = Some(conn);
        Ok(())
    }

    /// Discard every prepared statement, then close the connection. On
    /// failure the connection stays open.
    pub fn close(&mut self) -> Result<()> {
        self.prepared.clear();
        let conn = self.conn.take().ok_or(Error::NotConnected)?;
        // closing also finalizes the cached statements
        match conn.close() {
            Ok(()) => {
                debug!(path = %self.config.path, "closed database");
                self.auto_commit = true;
                Ok(())
            }
            Err((conn, err)) => {
                warn!(error = %err, "failed to close database");
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }

    pub fn is_connection_open(&self) -> bool {
        self.conn.is_some()
    }

    pub(crate) fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::NotConnected)
    }

    /// Run `op` on the live connection, rolling back an open transaction
    /// when the engine rejects an operation. Client-side failures leave the
    /// transaction untouched.
    pub(crate) fn run<R>(&self, op: impl FnOnce(&Connection) -> Result<R>) -> Result<R> {
        let conn = self.connection()?;
        match op(conn) {
            Ok(value) => Ok(value),
            Err(err) => {
                if err.is_engine_error() {
                    recover(conn, self.auto_commit);
                }
                Err(err)
            }
        }
    }

    // ========================================
    // Ad hoc execution
    // ========================================

    /// Run a query and hand its cursor to `handler`.
    pub fn execute_query<T, S, F>(&self, query: &S, handler: F) -> Result<QueryResult<T>>
    where
        S: SqlSource + ?Sized,
        F: FnOnce(&mut Rows<'_>) -> rusqlite::Result<QueryResultBuilder<T>>,
    {
        let sql = query.to_sql()?;
        self.run(|conn| {
            trace!(%sql, "executing query");
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            Ok(handler(&mut rows)?.build())
        })
    }

    /// Run a single statement and return the number of changed rows.
    pub fn execute_update<S: SqlSource + ?Sized>(&self, query: &S) -> Result<usize> {
        let sql = query.to_sql()?;
        self.run(|conn| {
            trace!(%sql, "executing update");
            Ok(conn.execute(&sql, [])?)
        })
    }

    /// Run an update and collect the generated keys as text.
    ///
    /// Keys come from `last_insert_rowid()`, so only INSERT statements yield
    /// meaningful ids. An UPDATE or DELETE that changes rows reports the
    /// rowid of the last INSERT made on this connection; one that changes
    /// nothing yields an empty result.
    pub fn execute_update_and_get_ids<S: SqlSource + ?Sized>(
        &self,
        query: &S,
    ) -> Result<QueryResult<String>> {
        let sql = query.to_sql()?;
        self.run(|conn| {
            trace!(%sql, "executing update returning ids");
            conn.execute(&sql, [])?;
            read_generated_keys(conn, &handlers::generated_ids())
        })
    }

    /// First generated key as an integer. See
    /// [`execute_update_and_get_ids`](Self::execute_update_and_get_ids) for
    /// which statements produce keys.
    pub fn execute_update_and_get_int_id<S: SqlSource + ?Sized>(&self, query: &S) -> Result<i64> {
        let sql = query.to_sql()?;
        self.run(|conn| {
            trace!(%sql, "executing update returning id");
            conn.execute(&sql, [])?;
            first_generated_key(conn)
        })
    }

    pub fn execute_update_and_get_string_id<S: SqlSource + ?Sized>(
        &self,
        query: &S,
    ) -> Result<String> {
        let sql = query.to_sql()?;
        self.run(|conn| {
            trace!(%sql, "executing update returning id");
            conn.execute(&sql, [])?;
            first_generated_key_text(conn)
        })
    }

    // ========================================
    // Saved and prepared queries
    // ========================================

    /// Register `query` under its name, replacing any earlier entry.
    pub fn save_query(&mut self, query: SavedQuery) {
        debug!(name = query.name(), "saved query");
        self.saved_queries.insert(query.name().to_string(), query);
    }

    pub fn save_queries(&mut self, queries: impl IntoIterator<Item = SavedQuery>) {
        for query in queries {
            self.save_query(query);
        }
    }

    pub fn saved_query(&self, name: &str) -> Option<&SavedQuery> {
        self.saved_queries.get(name)
    }

    pub fn is_prepared(&self, name: &str) -> bool {
        self.prepared.contains_key(name)
    }

    /// Compile each named query on the live connection. Stops at the first
    /// name that is unknown or fails to compile; earlier names stay prepared.
    pub fn prepare_queries(&mut self, names: &[&str]) -> Result<()> {
        let conn = self.conn.as_ref().ok_or(Error::NotConnected)?;
        for &name in names {
            let saved = self
                .saved_queries
                .get(name)
                .ok_or_else(|| Error::QueryNotSaved(name.to_string()))?;

            // every prepared query plus the generated-keys cursor stays cached
            let needed = self.prepared.len() + 2;
            if needed > self.cache_capacity {
                conn.set_prepared_statement_cache_capacity(needed);
                self.cache_capacity = needed;
            }

            if let Err(err) = conn.prepare_cached(saved.sql()) {
                let err = Error::from(err);
                if err.is_engine_error() {
                    recover(conn, self.auto_commit);
                }
                return Err(err);
            }
            self.prepared.insert(
                name.to_string(),
                PreparedQuery {
                    sql: saved.sql().to_string(),
                    returns_generated_ids: saved.returns_generated_ids(),
                },
            );
            debug!(name, "prepared query");
        }
        Ok(())
    }

    fn prepared(&self, name: &str) -> Result<&PreparedQuery> {
        self.prepared
            .get(name)
            .ok_or_else(|| Error::QueryNotPrepared(name.to_string()))
    }

    fn saved(&self, name: &str) -> Result<&SavedQuery> {
        self.saved_queries
            .get(name)
            .ok_or_else(|| Error::QueryNotSaved(name.to_string()))
    }

    /// The prepared query for `name`, which must return generated ids.
    fn prepared_with_ids(&self, name: &str) -> Result<&PreparedQuery> {
        let prepared = self.prepared(name)?;
        if !prepared.returns_generated_ids {
            return Err(Error::IdsNotReturned(name.to_string()));
        }
        Ok(prepared)
    }

    /// Bind `values` into the prepared query, run it, and pass the cursor
    /// through the query's handler.
    pub fn execute_saved_query<T: 'static>(
        &self,
        name: &str,
        values: &[QueryValue],
    ) -> Result<QueryResult<T>> {
        let prepared = self.prepared(name)?;
        let handler: RowHandler<T> = self.saved(name)?.handler()?;
        self.run(|conn| {
            trace!(name, sql = %prepared.sql, "executing saved query");
            let mut stmt = conn.prepare_cached(&prepared.sql)?;
            let mut rows = stmt.query(params_from_iter(values))?;
            Ok((*handler)(&mut rows)?.build())
        })
    }

    /// Like [`execute_saved_query`](Self::execute_saved_query), but any
    /// failure is logged and yields an empty result.
    pub fn execute_saved_query_or_empty<T: 'static>(
        &self,
        name: &str,
        values: &[QueryValue],
    ) -> QueryResult<T> {
        self.execute_saved_query(name, values).unwrap_or_else(|err| {
            warn!(name, error = %err, "saved query failed, returning empty result");
            QueryResult::empty()
        })
    }

    /// Bind `values` into the prepared query and run it as an update.
    /// Returns the number of changed rows.
    pub fn execute_saved_update(&self, name: &str, values: &[QueryValue]) -> Result<usize> {
        let prepared = self.prepared(name)?;
        self.run(|conn| execute_prepared(conn, name, prepared, values))
    }

    /// Run the prepared update and pass the generated-key cursor through the
    /// query's handler, or collect the keys as text when it has none.
    ///
    /// As with [`execute_update_and_get_ids`](Self::execute_update_and_get_ids),
    /// only INSERT statements produce their own keys.
    pub fn execute_saved_update_and_get_ids<T: 'static>(
        &self,
        name: &str,
        values: &[QueryValue],
    ) -> Result<QueryResult<T>> {
        let prepared = self.prepared_with_ids(name)?;
        let handler: RowHandler<T> = self.saved(name)?.ids_handler()?;
        self.run(|conn| {
            execute_prepared(conn, name, prepared, values)?;
            read_generated_keys(conn, &handler)
        })
    }

    pub fn execute_saved_update_and_get_int_id(
        &self,
        name: &str,
        values: &[QueryValue],
    ) -> Result<i64> {
        let prepared = self.prepared_with_ids(name)?;
        self.run(|conn| {
            execute_prepared(conn, name, prepared, values)?;
            first_generated_key(conn)
        })
    }

    pub fn execute_saved_update_and_get_string_id(
        &self,
        name: &str,
        values: &[QueryValue],
    ) -> Result<String> {
        let prepared = self.prepared_with_ids(name)?;
        self.run(|conn| {
            execute_prepared(conn, name, prepared, values)?;
            first_generated_key_text(conn)
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.config.path)
            .field("open", &self.conn.is_some())
            .field("saved_queries", &self.saved_queries.len())
            .field("prepared", &self.prepared.len())
            .field("auto_commit", &self.auto_commit)
            .finish()
    }
}

fn execute_prepared(
    conn: &Connection,
    name: &str,
    prepared: &PreparedQuery,
    values: &[QueryValue],
) -> Result<usize> {
    trace!(name, sql = %prepared.sql, "executing saved update");
    let mut stmt = conn.prepare_cached(&prepared.sql)?;
    Ok(stmt.execute(params_from_iter(values))?)
}

fn read_generated_keys<T>(conn: &Connection, handler: &RowHandler<T>) -> Result<QueryResult<T>> {
    let mut stmt = conn.prepare_cached(GENERATED_KEYS_SQL)?;
    let mut rows = stmt.query([])?;
    Ok((**handler)(&mut rows)?.build())
}

fn first_generated_key(conn: &Connection) -> Result<i64> {
    let mut stmt = conn.prepare_cached(GENERATED_KEYS_SQL)?;
    let mut rows = stmt.query([])?;
    let row = rows.next()?.ok_or(Error::NoGeneratedKey)?;
    let id = row.get(0)?;
    Ok(id)
}

fn first_generated_key_text(conn: &Connection) -> Result<String> {
    let mut stmt = conn.prepare_cached(GENERATED_KEYS_SQL)?;
    let mut rows = stmt.query([])?;
    let row = rows.next()?.ok_or(Error::NoGeneratedKey)?;
    let id = sqlite_to_text(row, 0)?;
    Ok(id)
}
