use crate::builders::{non_empty, require_table, QueryBuilder};
use crate::error::Result;

/// `DELETE FROM <name> [WHERE ...] [LIMIT n];`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    table_name: String,
    where_clause: Option<String>,
    limit: Option<u64>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = non_empty(predicate.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }
}

impl QueryBuilder for Delete {
    fn build(&self) -> Result<String> {
        require_table(&self.table_name)?;
        let mut query = format!("DELETE FROM {}", self.table_name);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_all() {
        assert_eq!(Delete::new().table_name("t").build().unwrap(), "DELETE FROM t;");
    }

    #[test]
    fn test_delete_with_where_and_limit() {
        let query = Delete::new().table_name("t").where_clause("id > ?").limit(10);
        assert_eq!(query.build().unwrap(), "DELETE FROM t WHERE id > ? LIMIT 10;");
    }

    #[test]
    fn test_missing_table_name() {
        assert!(Delete::new().where_clause("id = 1").build().is_err());
    }
}
