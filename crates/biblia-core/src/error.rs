use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A result row did not have the shape its decoder expects.
    #[error("decode failure on column `{column}`: expected {expected}")]
    Decode {
        column: String,
        expected: &'static str,
    },

    #[error("store is closed")]
    Closed,
}

impl Error {
    pub(crate) fn decode(column: impl Into<String>, expected: &'static str) -> Self {
        Self::Decode {
            column: column.into(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
