use crate::builders::{put_value, require_table, QueryBuilder, SqlValue, PLACEHOLDER};
use crate::error::{Error, Result};

/// `INSERT INTO <name> (<columns>) VALUES (<values>);`
///
/// Columns keep the order of their first insertion; adding a column again
/// replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    table_name: String,
    values: Vec<(String, String)>,
}

impl Insert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Literal value: text is quoted, numbers are not.
    pub fn add_value(mut self, column: impl Into<String>, value: impl SqlValue) -> Self {
        put_value(&mut self.values, column.into(), value.to_literal());
        self
    }

    /// Value written verbatim, e.g. an SQL expression.
    pub fn add_raw_value(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        put_value(&mut self.values, column.into(), value.into());
        self
    }

    /// Positional `?` placeholder bound at execution time.
    pub fn add_prepared_value(mut self, column: impl Into<String>) -> Self {
        put_value(&mut self.values, column.into(), PLACEHOLDER.to_string());
        self
    }
}

impl QueryBuilder for Insert {
    fn build(&self) -> Result<String> {
        require_table(&self.table_name)?;
        if self.values.is_empty() {
            return Err(Error::malformed("No values given"));
        }
        let (columns, values): (Vec<&str>, Vec<&str>) = self
            .values
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
            .unzip();
        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table_name,
            columns.join(","),
            values.join(",")
        ))
    }
}
