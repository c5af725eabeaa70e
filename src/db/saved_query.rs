//! Saved queries - named SQL text with an optional row handler

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use rusqlite::Rows;

use crate::builders::QueryBuilder;
use crate::db::handlers::{self, RowHandler};
use crate::error::{Error, Result};
use crate::models::QueryResultBuilder;

/// A row handler with its row type erased so queries producing different
/// types can share one registry.
#[derive(Clone)]
struct ErasedHandler {
    handler: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ErasedHandler {
    fn new<T: 'static>(handler: RowHandler<T>) -> Self {
        ErasedHandler {
            handler: Arc::new(handler),
            type_name: type_name::<T>(),
        }
    }

    fn downcast<T: 'static>(&self) -> Option<RowHandler<T>> {
        self.handler.downcast_ref::<RowHandler<T>>().cloned()
    }
}

/// A named statement registered on a [`Database`](crate::Database).
#[derive(Clone)]
pub struct SavedQuery {
    name: String,
    sql: String,
    handler: Option<ErasedHandler>,
    returns_generated_ids: bool,
}

impl SavedQuery {
    pub fn builder() -> SavedQueryBuilder {
        SavedQueryBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn returns_generated_ids(&self) -> bool {
        self.returns_generated_ids
    }

    /// The handler typed as producing `T`.
    pub(crate) fn handler<T: 'static>(&self) -> Result<RowHandler<T>> {
        let erased = self
            .handler
            .as_ref()
            .ok_or_else(|| Error::MissingHandler(self.name.clone()))?;
        self.typed(erased)
    }

    /// The handler for generated-key cursors: the query's own, or the
    /// default one yielding each key as text.
    pub(crate) fn ids_handler<T: 'static>(&self) -> Result<RowHandler<T>> {
        match &self.handler {
            Some(erased) => self.typed(erased),
            None => self.typed(&ErasedHandler::new(handlers::generated_ids())),
        }
    }

    fn typed<T: 'static>(&self, erased: &ErasedHandler) -> Result<RowHandler<T>> {
        erased.downcast::<T>().ok_or_else(|| Error::HandlerType {
            name: self.name.clone(),
            expected: type_name::<T>(),
        })
    }
}

impl fmt::Debug for SavedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedQuery")
            .field("name", &self.name)
            .field("sql", &self.sql)
            .field("handler", &self.handler.as_ref().map(|h| h.type_name))
            .field("returns_generated_ids", &self.returns_generated_ids)
            .finish()
    }
}

/// Builder for [`SavedQuery`]. A statement builder given through
/// [`query`](Self::query) is rendered when [`build`](Self::build) runs.
#[derive(Default)]
pub struct SavedQueryBuilder {
    name: Option<String>,
    sql: Option<String>,
    query: Option<Box<dyn QueryBuilder>>,
    handler: Option<ErasedHandler>,
    returns_generated_ids: bool,
}

impl SavedQueryBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Raw SQL text. Takes precedence over [`query`](Self::query).
    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn query(mut self, query: impl QueryBuilder + 'static) -> Self {
        self.query = Some(Box::new(query));
        self
    }

    pub fn handler<T, F>(mut self, f: F) -> Self
    where
        T: 'static,
        F: Fn(&mut Rows<'_>) -> rusqlite::Result<QueryResultBuilder<T>> + Send + Sync + 'static,
    {
        self.handler = Some(ErasedHandler::new(handlers::handler(f)));
        self
    }

    /// Use an existing shared handler, e.g. one from [`handlers`].
    pub fn row_handler<T: 'static>(mut self, handler: RowHandler<T>) -> Self {
        self.handler = Some(ErasedHandler::new(handler));
        self
    }

    /// Allow the `*_and_get_ids` family on this query. Meant for INSERT
    /// statements: keys are read from `last_insert_rowid()`, which UPDATE
    /// and DELETE do not change.
    pub fn returns_generated_ids(self) -> Self {
        self.set_returns_generated_ids(true)
    }

    pub fn set_returns_generated_ids(mut self, returns_generated_ids: bool) -> Self {
        self.returns_generated_ids = returns_generated_ids;
        self
    }

    pub fn build(self) -> Result<SavedQuery> {
        let sql = match (self.sql, &self.query) {
            (Some(sql), _) => sql,
            (None, Some(query)) => query.build()?,
            (None, None) => String::new(),
        };
        let name = self.name.unwrap_or_default();
        if name.is_empty() {
            return Err(Error::InvalidSavedQuery("SavedQuery missing name".to_string()));
        }
        if sql.is_empty() {
            return Err(Error::InvalidSavedQuery("SavedQuery missing query".to_string()));
        }
        Ok(SavedQuery {
            name,
            sql,
            handler: self.handler,
            returns_generated_ids: self.returns_generated_ids,
        })
    }
}
