use std::fmt;

use crate::builders::{non_empty, require_table, QueryBuilder};
use crate::error::{Error, Result};

/// Join kinds accepted by [`Select::add_join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    LeftOuter,
    Cross,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::LeftOuter => "LEFT OUTER",
            JoinType::Cross => "CROSS",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for JoinType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// `SELECT [DISTINCT] <columns> FROM <name> [joins] [WHERE ...] [ORDER BY ...] [LIMIT n];`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    columns: Vec<String>,
    table_name: String,
    joins: Vec<String>,
    where_clause: Option<String>,
    order_by: Option<String>,
    limit: Option<u64>,
    distinct: bool,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single column. Empty input leaves the columns untouched.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if !column.is_empty() {
            self.columns = vec![column];
        }
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Adds `<join_type> JOIN <table> ON <left> = <right>`.
    pub fn add_join(
        mut self,
        join_type: impl AsRef<str>,
        table_name: &str,
        left: &str,
        right: &str,
    ) -> Self {
        self.joins.push(format!(
            "{} JOIN {} ON {} = {}",
            join_type.as_ref(),
            table_name,
            left,
            right
        ));
        self
    }

    /// Adds a caller-written join clause verbatim.
    pub fn add_raw_join(mut self, join: impl Into<String>) -> Self {
        self.joins.push(join.into());
        self
    }

    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = non_empty(predicate.into());
        self
    }

    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = non_empty(order.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    pub fn distinct(self) -> Self {
        self.set_distinct(true)
    }

    pub fn set_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }
}

impl QueryBuilder for Select {
    fn build(&self) -> Result<String> {
        if self.columns.is_empty() {
            return Err(Error::malformed("No columns given"));
        }
        require_table(&self.table_name)?;

        let mut parts = vec!["SELECT".to_string()];
        if self.distinct {
            parts.push("DISTINCT".to_string());
        }
        parts.push(self.columns.join(","));
        parts.push("FROM".to_string());
        parts.push(self.table_name.clone());
        parts.extend(self.joins.iter().cloned());
        if let Some(predicate) = &self.where_clause {
            parts.push(format!("WHERE {}", predicate));
        }
        if let Some(order) = &self.order_by {
            parts.push(format!("ORDER BY {}", order));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {}", limit));
        }

        let mut query = parts.join(" ");
        query.push(';');
        Ok(query)
    }
}
