use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ids::HistoryId;
use crate::schema::{FromRow, Row};

/// A chapter visit. Collapsed to one row per chapter per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub book_id: u32,
    pub chapter: u32,
    pub timestamp: DateTime<Utc>,
}

impl FromRow for HistoryEntry {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: HistoryId::from_string(row.text("id")?),
            book_id: row.u32("book_id")?,
            chapter: row.u32("chapter_number")?,
            timestamp: row.timestamp("timestamp")?,
        })
    }
}
