use serde::{Deserialize, Serialize};

/// Rows produced by a query: at most one single value plus any number of
/// row values, in cursor order.
///
/// Built through [`QueryResultBuilder`] by a row handler and frozen before
/// it reaches the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    value: Option<T>,
    values: Vec<T>,
}

impl<T> QueryResult<T> {
    /// A result holding nothing.
    pub fn empty() -> Self {
        QueryResult {
            value: None,
            values: Vec::new(),
        }
    }

    /// Start accumulating a new result.
    pub fn builder() -> QueryResultBuilder<T> {
        QueryResultBuilder::new()
    }

    /// `true` when there is neither a single value nor any row value.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.values.is_empty()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn into_parts(self) -> (Option<T>, Vec<T>) {
        (self.value, self.values)
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Mutable accumulator a row handler fills while walking a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResultBuilder<T> {
    value: Option<T>,
    values: Vec<T>,
}

impl<T> QueryResultBuilder<T> {
    pub fn new() -> Self {
        QueryResultBuilder {
            value: None,
            values: Vec::new(),
        }
    }

    /// Set the single value, replacing any earlier one.
    pub fn set_value(&mut self, value: T) -> &mut Self {
        self.value = Some(value);
        self
    }

    /// Append a row value.
    pub fn add_value(&mut self, value: T) -> &mut Self {
        self.values.push(value);
        self
    }

    pub fn build(self) -> QueryResult<T> {
        QueryResult {
            value: self.value,
            values: self.values,
        }
    }
}

impl<T> Default for QueryResultBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
