use crate::builders::{require_table, QueryBuilder};
use crate::error::Result;

/// `DROP TABLE [IF EXISTS] <name>;`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropTable {
    table_name: String,
    if_exists: bool,
}

impl DropTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn if_exists(self) -> Self {
        self.set_if_exists(true)
    }

    pub fn set_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

impl QueryBuilder for DropTable {
    fn build(&self) -> Result<String> {
        require_table(&self.table_name)?;
        let mut query = String::from("DROP TABLE ");
        if self.if_exists {
            query.push_str("IF EXISTS ");
        }
        query.push_str(&self.table_name);
        query.push(';');
        Ok(query)
    }
}
