//! SQLite type names and SQL expression detection used when rendering
//! column definitions.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for detecting SQL function calls like datetime('now'), strftime('%s', 'now')
static SQL_FUNCTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z_]+\s*\(").expect("valid function regex"));

/// Regex for detecting SQL expressions (starts with parenthesis)
static SQL_EXPRESSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(").expect("valid expression regex"));

/// Known SQL keywords that should not be quoted in DEFAULT clauses
static SQL_KEYWORDS: &[&str] = &[
    "CURRENT_TIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "NULL",
    "TRUE",
    "FALSE",
];

/// SQLite storage classes usable as column data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqliteType {
    /// Null type
    Null,
    /// Integer type (INTEGER)
    Integer,
    /// Real/Float type (REAL)
    Real,
    /// Text type (TEXT)
    Text,
    /// Blob/Binary type (BLOB)
    Blob,
}

impl SqliteType {
    /// Get the SQLite type name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            SqliteType::Null => "NULL",
            SqliteType::Integer => "INTEGER",
            SqliteType::Real => "REAL",
            SqliteType::Text => "TEXT",
            SqliteType::Blob => "BLOB",
        }
    }

    /// Get type from string name (case insensitive)
    pub fn parse_type(s: &str) -> Option<SqliteType> {
        match s.trim().to_uppercase().as_str() {
            "NULL" => Some(SqliteType::Null),
            "INTEGER" | "INT" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "BIGINT"
            | "UNSIGNED BIG INT" => Some(SqliteType::Integer),
            "REAL" | "DOUBLE" | "FLOAT" | "NUMERIC" | "DECIMAL" => Some(SqliteType::Real),
            "TEXT" | "CHARACTER" | "VARCHAR" | "VARYING CHARACTER" | "NCHAR"
            | "NATIVE CHARACTER" | "NVARCHAR" | "CLOB" => Some(SqliteType::Text),
            "BLOB" | "NONE" => Some(SqliteType::Blob),
            _ => None,
        }
    }

    /// Get all supported SQLite type names
    pub fn supported_types() -> Vec<&'static str> {
        vec!["NULL", "INTEGER", "REAL", "TEXT", "BLOB"]
    }

    /// Whether DEFAULT literals for this type are written as quoted strings.
    pub fn quotes_defaults(&self) -> bool {
        matches!(self, SqliteType::Text | SqliteType::Blob)
    }
}

impl fmt::Display for SqliteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SqliteType> for String {
    fn from(ty: SqliteType) -> Self {
        ty.as_str().to_string()
    }
}

/// What kind of SQL expression a DEFAULT value looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    Parenthesized,
    FunctionCall,
    Keyword,
}

/// Classify a value as an SQL expression that must not be quoted.
pub fn classify_expression(value: &str) -> Option<ExpressionKind> {
    let trimmed = value.trim();

    if SQL_EXPRESSION_REGEX.is_match(trimmed) {
        return Some(ExpressionKind::Parenthesized);
    }

    if SQL_FUNCTION_REGEX.is_match(trimmed) {
        return Some(ExpressionKind::FunctionCall);
    }

    let upper = trimmed.to_uppercase();
    if SQL_KEYWORDS.iter().any(|keyword| upper == *keyword) {
        return Some(ExpressionKind::Keyword);
    }

    None
}

/// Check if a value is an SQL expression that should not be quoted
///
/// # Examples
/// ```rust
/// use sqlite_kit::schema::is_sql_expression;
///
/// assert!(is_sql_expression("datetime('now')"));
/// assert!(is_sql_expression("CURRENT_TIMESTAMP"));
/// assert!(is_sql_expression("(strftime('%s', 'now'))"));
/// assert!(!is_sql_expression("hello world"));
/// ```
pub fn is_sql_expression(value: &str) -> bool {
    classify_expression(value).is_some()
}
