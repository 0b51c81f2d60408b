use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::ids::{BookmarkId, HighlightId};
use crate::model::verse::VerseRef;
use crate::schema::{FromRow, Row};

/// A saved verse with an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub verse: VerseRef,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Bookmark {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: BookmarkId::from_string(row.text("id")?),
            verse: verse_ref(row)?,
            note: row.opt_text("note")?,
            created_at: row.timestamp("created_at")?,
        })
    }
}

/// Marker colors available for highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Pink,
    Orange,
}

impl HighlightColor {
    pub const ALL: [Self; 5] = [
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Pink,
        Self::Orange,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Orange => "orange",
        }
    }

    /// Display swatch for the marker.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#FFF59D",
            Self::Green => "#A5D6A7",
            Self::Blue => "#90CAF9",
            Self::Pink => "#F48FB1",
            Self::Orange => "#FFCC80",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("unknown highlight color: {s}")))
    }
}

/// A colored marker on a single verse. At most one exists per verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub verse: VerseRef,
    pub color: HighlightColor,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Highlight {
    fn from_row(row: &Row) -> Result<Self> {
        let color = row
            .text("color")?
            .parse()
            .map_err(|_| Error::decode("color", "highlight color"))?;
        Ok(Self {
            id: HighlightId::from_string(row.text("id")?),
            verse: verse_ref(row)?,
            color,
            created_at: row.timestamp("created_at")?,
        })
    }
}

fn verse_ref(row: &Row) -> Result<VerseRef> {
    Ok(VerseRef::new(
        row.u32("book_id")?,
        row.u32("chapter_number")?,
        row.u32("verse_number")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!("Pink".parse::<HighlightColor>().unwrap(), HighlightColor::Pink);
        assert!("purple".parse::<HighlightColor>().is_err());
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(HighlightColor::Yellow.hex(), "#FFF59D");
    }
}
