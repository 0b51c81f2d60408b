use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Value;

use crate::error::{Error, Result};

/// A result row: named columns mapped to dynamically typed values.
///
/// Typed accessors fail with [`Error::Decode`] when a column is missing or
/// holds the wrong type, so a query/decoder mismatch surfaces immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Build a row from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn get(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| Error::decode(column, "a column of that name"))
    }

    pub fn i64(&self, column: &str) -> Result<i64> {
        match self.get(column)? {
            Value::Integer(v) => Ok(*v),
            _ => Err(Error::decode(column, "integer")),
        }
    }

    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            _ => Err(Error::decode(column, "integer or null")),
        }
    }

    pub fn u32(&self, column: &str) -> Result<u32> {
        u32::try_from(self.i64(column)?).map_err(|_| Error::decode(column, "unsigned 32-bit integer"))
    }

    pub fn u64(&self, column: &str) -> Result<u64> {
        u64::try_from(self.i64(column)?).map_err(|_| Error::decode(column, "non-negative integer"))
    }

    /// Integer flag column (`0` / non-zero).
    pub fn flag(&self, column: &str) -> Result<bool> {
        Ok(self.opt_i64(column)?.unwrap_or(0) != 0)
    }

    pub fn text(&self, column: &str) -> Result<String> {
        match self.get(column)? {
            Value::Text(v) => Ok(v.clone()),
            _ => Err(Error::decode(column, "text")),
        }
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.clone())),
            _ => Err(Error::decode(column, "text or null")),
        }
    }

    /// Timestamp column, written either as RFC 3339 or by SQLite's
    /// `CURRENT_TIMESTAMP` (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>> {
        let raw = self.text(column)?;
        parse_timestamp(&raw).ok_or_else(|| Error::decode(column, "timestamp"))
    }

    pub fn opt_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>> {
        match self.opt_text(column)? {
            None => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| Error::decode(column, "timestamp or null")),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Decoder for one query's row shape.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

pub fn decode_all<T: FromRow>(rows: Vec<Row>) -> Result<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

pub fn decode_first<T: FromRow>(row: Option<Row>) -> Result<Option<T>> {
    row.as_ref().map(T::from_row).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::from_pairs([
            ("book_id", Value::Integer(1)),
            ("text", Value::Text("No princípio".to_string())),
            ("note", Value::Null),
            ("created_at", Value::Text("2024-03-01 08:30:00".to_string())),
        ])
    }

    #[test]
    fn test_typed_accessors() {
        let row = sample();
        assert_eq!(row.u32("book_id").unwrap(), 1);
        assert_eq!(row.text("text").unwrap(), "No princípio");
        assert_eq!(row.opt_text("note").unwrap(), None);
        assert_eq!(
            row.timestamp("created_at").unwrap().to_rfc3339(),
            "2024-03-01T08:30:00+00:00"
        );
    }

    #[test]
    fn test_missing_column_is_decode_error() {
        let err = sample().text("version_id").unwrap_err();
        assert!(matches!(err, Error::Decode { ref column, .. } if column == "version_id"));
    }

    #[test]
    fn test_wrong_type_is_decode_error() {
        let row = sample();
        assert!(matches!(row.i64("text"), Err(Error::Decode { .. })));
        assert!(matches!(row.text("book_id"), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_negative_integer_rejected_for_u32() {
        let row = Row::from_pairs([("n", Value::Integer(-4))]);
        assert!(matches!(row.u32("n"), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let row = Row::from_pairs([(
            "ts",
            Value::Text("2024-03-01T08:30:00.120Z".to_string()),
        )]);
        assert!(row.timestamp("ts").is_ok());
    }
}
