use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// A Quran verse with its Arabic text and translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuranVerse {
    pub surah: u32,
    pub verse: u32,
    pub text_arabic: String,
    pub text_translated: String,
}

impl FromRow for QuranVerse {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            surah: row.u32("surah_number")?,
            verse: row.u32("verse_number")?,
            text_arabic: row.text("text_arabic")?,
            text_translated: row.text("text_portuguese")?,
        })
    }
}
