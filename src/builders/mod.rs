//! Fluent builders that render SQL statement text.
//!
//! Every builder is a plain value: setters consume and return it, `Clone`
//! is a deep copy, and [`QueryBuilder::build`] renders the current state or
//! fails with [`Error::MalformedQuery`].

mod column;
mod create_table;
mod delete;
mod drop_table;
mod insert;
mod select;
mod update;

pub use column::Column;
pub use create_table::CreateTable;
pub use delete::Delete;
pub use drop_table::DropTable;
pub use insert::Insert;
pub use select::{JoinType, Select};
pub use update::Update;

use crate::error::{Error, Result};

/// A statement builder.
pub trait QueryBuilder {
    /// Validate the configuration and render it as SQL text.
    fn build(&self) -> Result<String>;

    /// An independent copy of the current configuration.
    fn duplicate(&self) -> Self
    where
        Self: Sized + Clone,
    {
        self.clone()
    }
}

/// Anything that can be turned into SQL text: raw strings or builders.
pub trait SqlSource {
    fn to_sql(&self) -> Result<String>;
}

impl SqlSource for str {
    fn to_sql(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl SqlSource for String {
    fn to_sql(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl<B: QueryBuilder> SqlSource for B {
    fn to_sql(&self) -> Result<String> {
        self.build()
    }
}

/// A scalar that can appear as a literal in a statement.
pub trait SqlValue {
    /// Rendered as an INSERT/UPDATE literal: text quoted, numbers bare.
    fn to_literal(&self) -> String;

    /// Rendered without quoting.
    fn to_raw(&self) -> String;
}

macro_rules! impl_sql_value_integer {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn to_literal(&self) -> String {
                    self.to_string()
                }

                fn to_raw(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! impl_sql_value_float {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn to_literal(&self) -> String {
                    self.to_raw()
                }

                // SQLite has no NaN or infinity literals; it stores NaN as NULL
                // and reads out-of-range reals as infinity.
                fn to_raw(&self) -> String {
                    if self.is_nan() {
                        "NULL".to_string()
                    } else if self.is_infinite() {
                        let sign = if self.is_sign_negative() { "-" } else { "" };
                        format!("{}9e999", sign)
                    } else {
                        format!("{:?}", self)
                    }
                }
            }
        )*
    };
}

impl_sql_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_sql_value_float!(f32, f64);

impl SqlValue for bool {
    fn to_literal(&self) -> String {
        self.to_raw()
    }

    fn to_raw(&self) -> String {
        let digit = if *self { "1" } else { "0" };
        digit.to_string()
    }
}

impl SqlValue for str {
    fn to_literal(&self) -> String {
        quote(self)
    }

    fn to_raw(&self) -> String {
        self.to_string()
    }
}

impl SqlValue for String {
    fn to_literal(&self) -> String {
        quote(self)
    }

    fn to_raw(&self) -> String {
        self.clone()
    }
}

impl<T: SqlValue + ?Sized> SqlValue for &T {
    fn to_literal(&self) -> String {
        (**self).to_literal()
    }

    fn to_raw(&self) -> String {
        (**self).to_raw()
    }
}

/// Positional parameter placeholder.
pub(crate) const PLACEHOLDER: &str = "?";

/// Wrap text in double quotes, doubling any embedded quote.
pub(crate) fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

pub(crate) fn require_table(table_name: &str) -> Result<()> {
    if table_name.is_empty() {
        return Err(Error::malformed("Missing table name"));
    }
    Ok(())
}

/// Insert or overwrite `column` keeping the position of its first insertion.
pub(crate) fn put_value(values: &mut Vec<(String, String)>, column: String, value: String) {
    match values.iter_mut().find(|(existing, _)| *existing == column) {
        Some(entry) => entry.1 = value,
        None => values.push((column, value)),
    }
}

/// Treat empty strings as unset.
pub(crate) fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
