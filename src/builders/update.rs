use crate::builders::{non_empty, put_value, require_table, QueryBuilder, SqlValue, PLACEHOLDER};
use crate::error::{Error, Result};

/// `UPDATE <name> SET <column> = <value>,... [WHERE ...] [LIMIT n];`
///
/// `LIMIT` on UPDATE needs an engine compiled with
/// `SQLITE_ENABLE_UPDATE_DELETE_LIMIT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    table_name: String,
    values: Vec<(String, String)>,
    where_clause: Option<String>,
    limit: Option<u64>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn add_value(mut self, column: impl Into<String>, value: impl SqlValue) -> Self {
        put_value(&mut self.values, column.into(), value.to_literal());
        self
    }

    pub fn add_raw_value(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        put_value(&mut self.values, column.into(), value.into());
        self
    }

    pub fn add_prepared_value(mut self, column: impl Into<String>) -> Self {
        put_value(&mut self.values, column.into(), PLACEHOLDER.to_string());
        self
    }

    /// Raw predicate, inserted verbatim.
    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = non_empty(predicate.into());
        self
    }

    /// Zero clears the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }
}

impl QueryBuilder for Update {
    fn build(&self) -> Result<String> {
        require_table(&self.table_name)?;
        if self.values.is_empty() {
            return Err(Error::malformed("No values given"));
        }

        let assignments: Vec<String> = self
            .values
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect();
        let mut query = format!("UPDATE {} SET {}", self.table_name, assignments.join(","));
        if let Some(predicate) = &self.where_clause {
            query.push_str(" WHERE ");
            query.push_str(predicate);
        }
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        query.push(';');
        Ok(query)
    }
}
