use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// Version used when a caller does not name one.
pub const DEFAULT_VERSION: &str = "acf";

/// A translation of the Bible (e.g. "acf" = Almeida Corrigida Fiel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVersion {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub language: String,
    pub description: Option<String>,
}

impl FromRow for BibleVersion {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.text("id")?,
            name: row.text("name")?,
            abbreviation: row.text("abbreviation")?,
            language: row.text("language")?,
            description: row.opt_text("description")?,
        })
    }
}
