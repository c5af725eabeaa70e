use crate::builders::{non_empty, quote, QueryBuilder, SqlValue};
use crate::error::{Error, Result};
use crate::schema::{classify_expression, ExpressionKind, SqliteType};

/// A single column definition for [`CreateTable`](super::CreateTable).
///
/// Renders as `<name> <type> [DEFAULT <value>] [NOT NULL] [PRIMARY KEY],`.
/// The trailing comma is consumed by the enclosing CREATE TABLE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    name: String,
    data_type: String,
    default_value: Option<DefaultValue>,
    not_null: bool,
    primary_key: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum DefaultValue {
    Value(String),
    Expression(String),
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Any type name is accepted; [`SqliteType`] covers the storage classes.
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Default value. Always quoted when the column type is text or blob; use
    /// [`default_expression`](Self::default_expression) for keywords and
    /// function calls.
    pub fn default_value(mut self, value: impl SqlValue) -> Self {
        self.default_value = non_empty(value.to_raw()).map(DefaultValue::Value);
        self
    }

    /// Default written unquoted, whatever the column type. Function calls such
    /// as `datetime('now')` are wrapped in parentheses, which SQLite requires
    /// for non-constant defaults.
    pub fn default_expression(mut self, expression: impl Into<String>) -> Self {
        self.default_value = non_empty(expression.into()).map(DefaultValue::Expression);
        self
    }

    pub fn not_null(self) -> Self {
        self.set_not_null(true)
    }

    pub fn set_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn primary_key(self) -> Self {
        self.set_primary_key(true)
    }

    pub fn set_primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    fn render_default(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Expression(expression) => match classify_expression(expression) {
                Some(ExpressionKind::FunctionCall) => format!("({})", expression.trim()),
                _ => expression.clone(),
            },
            DefaultValue::Value(value) => {
                let quoted = SqliteType::parse_type(&self.data_type)
                    .is_some_and(|ty| ty.quotes_defaults());
                if quoted {
                    quote(value)
                } else {
                    value.clone()
                }
            }
        }
    }
}

impl QueryBuilder for Column {
    fn build(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(Error::malformed("Missing column name"));
        }
        if self.data_type.is_empty() {
            return Err(Error::malformed("Missing data type"));
        }

        let mut parts = vec![self.name.clone(), self.data_type.clone()];
        if let Some(value) = &self.default_value {
            parts.push(format!("DEFAULT {}", self.render_default(value)));
        }
        if self.not_null {
            parts.push("NOT NULL".to_string());
        }
        if self.primary_key {
            parts.push("PRIMARY KEY".to_string());
        }

        let mut column = parts.join(" ");
        column.push(',');
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_column() {
        let column = Column::new().name("id").data_type(SqliteType::Integer);
        assert_eq!(column.build().unwrap(), "id INTEGER,");
    }

    #[test]
    fn test_full_column() {
        let column = Column::new()
            .name("age")
            .data_type("INTEGER")
            .default_value(18)
            .not_null()
            .primary_key();
        assert_eq!(
            column.build().unwrap(),
            "age INTEGER DEFAULT 18 NOT NULL PRIMARY KEY,"
        );
    }

    #[test]
    fn test_text_default_is_quoted() {
        let column = Column::new()
            .name("name")
            .data_type(SqliteType::Text)
            .default_value("anon");
        assert_eq!(column.build().unwrap(), "name TEXT DEFAULT \"anon\",");

        let blob = Column::new().name("b").data_type("BLOB").default_value(5);
        assert_eq!(blob.build().unwrap(), "b BLOB DEFAULT \"5\",");
    }

    #[test]
    fn test_text_default_never_read_as_sql() {
        for (value, rendered) in [
            ("null", "s TEXT DEFAULT \"null\","),
            ("false", "s TEXT DEFAULT \"false\","),
            ("CURRENT_TIMESTAMP", "s TEXT DEFAULT \"CURRENT_TIMESTAMP\","),
            ("none (default)", "s TEXT DEFAULT \"none (default)\","),
        ] {
            let column = Column::new().name("s").data_type("TEXT").default_value(value);
            assert_eq!(column.build().unwrap(), rendered);
        }
    }

    #[test]
    fn test_default_expression_is_not_quoted() {
        let keyword = Column::new()
            .name("created")
            .data_type("TEXT")
            .default_expression("CURRENT_TIMESTAMP");
        assert_eq!(
            keyword.build().unwrap(),
            "created TEXT DEFAULT CURRENT_TIMESTAMP,"
        );

        let call = Column::new()
            .name("created")
            .data_type("TEXT")
            .default_expression("datetime('now')");
        assert_eq!(
            call.build().unwrap(),
            "created TEXT DEFAULT (datetime('now')),"
        );

        let forced = Column::new()
            .name("tag")
            .data_type("TEXT")
            .default_expression("'x'");
        assert_eq!(forced.build().unwrap(), "tag TEXT DEFAULT 'x',");
    }

    #[test]
    fn test_duplicate_is_independent() {
        let base = Column::new().name("n").data_type("TEXT");
        let copy = base.duplicate().not_null();
        let base = base.default_value("x");

        assert_eq!(base.build().unwrap(), "n TEXT DEFAULT \"x\",");
        assert_eq!(copy.build().unwrap(), "n TEXT NOT NULL,");
    }

    #[test]
    fn test_real_default_is_not_quoted() {
        let column = Column::new().name("score").data_type("REAL").default_value(1.5);
        assert_eq!(column.build().unwrap(), "score REAL DEFAULT 1.5,");
    }

    #[test]
    fn test_empty_default_is_ignored() {
        let column = Column::new().name("n").data_type("TEXT").default_value("");
        assert_eq!(column.build().unwrap(), "n TEXT,");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            Column::new().data_type("TEXT").build(),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            Column::new().name("x").build(),
            Err(Error::MalformedQuery(_))
        ));
    }
}
