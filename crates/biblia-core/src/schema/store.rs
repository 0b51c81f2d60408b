//! The storage adapter contract.
//!
//! Every component that touches persisted data goes through [`Store`], so
//! the same loaders and accessors run against the SQLite-backed
//! [`Database`](super::Database) and the canned [`NullStore`](super::NullStore).

use std::fmt;

pub use rusqlite::types::Value;

use crate::error::Result;
use crate::schema::row::Row;

/// Outcome of a single write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Rows inserted, updated or deleted by the statement.
    pub changes: u64,
    pub last_insert_rowid: i64,
}

/// Uniform interface over an embedded relational store.
///
/// Calls are synchronous: each one completes before control returns to the
/// caller, which is the only ordering guarantee components rely on.
pub trait Store: fmt::Debug {
    /// Execute one or more `;`-separated statements with no result.
    fn execute_batch(&self, sql: &str) -> Result<()>;

    /// Run a single parameterized write statement.
    fn run(&self, sql: &str, params: &[Value]) -> Result<RunResult>;

    /// Run a parameterized query returning zero or more rows.
    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Run a parameterized query returning at most one row.
    fn query_first(&self, sql: &str, params: &[Value]) -> Result<Option<Row>>;

    /// Run `scope` atomically. Any error returned by the scope rolls back
    /// every write made inside it.
    fn transaction(&self, scope: &mut dyn FnMut(&dyn Store) -> Result<()>) -> Result<()>;

    /// Release the underlying resource. Later calls fail with
    /// [`Error::Closed`](crate::Error::Closed).
    fn close(&mut self) -> Result<()>;
}

/// Conversion into a bound statement parameter.
pub trait ToValue {
    fn to_value(self) -> Value;
}

macro_rules! to_value_via_from {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(self) -> Value {
                Value::from(self)
            }
        })*
    };
}

to_value_via_from!(i64, i32, u32, u8, f64, bool, String);

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for &String {
    fn to_value(self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        self.map_or(Value::Null, ToValue::to_value)
    }
}

/// Build a parameter array for [`Store`] calls.
///
/// ```
/// let params = biblia_core::args![1_u32, "acf"];
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        [$($crate::schema::ToValue::to_value($value)),*]
    };
}

/// Run an aggregate query whose single row exposes a `count` column.
pub fn count(store: &dyn Store, sql: &str, params: &[Value]) -> Result<u64> {
    match store.query_first(sql, params)? {
        Some(row) => row.u64("count"),
        None => Ok(0),
    }
}
