use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// A hymnal entry, keyed by its number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hymn {
    pub number: u32,
    pub title: String,
    pub lyrics: String,
    pub category: Option<String>,
}

impl FromRow for Hymn {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            number: row.u32("number")?,
            title: row.text("title")?,
            lyrics: row.text("lyrics")?,
            category: row.opt_text("category")?,
        })
    }
}
