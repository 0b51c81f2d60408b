use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// Coordinates of a verse, independent of translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseRef {
    pub book_id: u32,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    #[must_use]
    pub const fn new(book_id: u32, chapter: u32, verse: u32) -> Self {
        Self {
            book_id,
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.book_id, self.chapter, self.verse)
    }
}

/// A stored verse. Unique on (book, chapter, verse, version).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: i64,
    pub book_id: u32,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub version: String,
}

impl Verse {
    #[must_use]
    pub const fn reference(&self) -> VerseRef {
        VerseRef::new(self.book_id, self.chapter, self.verse)
    }
}

/// A verse waiting to be written; the surrogate `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVerse {
    pub book_id: u32,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub version: String,
}

impl FromRow for Verse {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.i64("id")?,
            book_id: row.u32("book_id")?,
            chapter: row.u32("chapter_number")?,
            verse: row.u32("verse_number")?,
            text: row.text("text")?,
            version: row.text("version_id")?,
        })
    }
}
