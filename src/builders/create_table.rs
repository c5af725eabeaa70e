use crate::builders::{require_table, Column, QueryBuilder};
use crate::error::{Error, Result};

/// `CREATE TABLE [IF NOT EXISTS] <name> (<columns>);`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    table_name: String,
    if_not_exists: bool,
    columns: Vec<Column>,
}

impl CreateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn if_not_exists(self) -> Self {
        self.set_if_not_exists(true)
    }

    pub fn set_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl QueryBuilder for CreateTable {
    fn build(&self) -> Result<String> {
        require_table(&self.table_name)?;
        if self.columns.is_empty() {
            return Err(Error::malformed("No columns given"));
        }

        let mut query = String::from("CREATE TABLE ");
        if self.if_not_exists {
            query.push_str("IF NOT EXISTS ");
        }
        query.push_str(&self.table_name);
        query.push_str(" (");
        for column in &self.columns {
            query.push_str(&column.build()?);
        }
        // last column's separator
        query.pop();
        query.push_str(");");
        Ok(query)
    }
}
