use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::schema::{FromRow, Row};

/// Collection a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Testament {
    Ot,
    Nt,
    Apocrypha,
    Quran,
    Torah,
}

impl Testament {
    /// Value stored in the `books.testament` column.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ot => "OT",
            Self::Nt => "NT",
            Self::Apocrypha => "APOCRYPHA",
            Self::Quran => "QURAN",
            Self::Torah => "TORAH",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Testament {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OT" => Ok(Self::Ot),
            "NT" => Ok(Self::Nt),
            "APOCRYPHA" => Ok(Self::Apocrypha),
            "QURAN" => Ok(Self::Quran),
            "TORAH" => Ok(Self::Torah),
            other => Err(Error::InvalidData(format!("unknown testament: {other}"))),
        }
    }
}

/// A book of scripture with its canonical numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub name: String,
    pub testament: Testament,
    pub chapters: u32,
    pub abbreviation: String,
    pub order: u32,
}

impl FromRow for Book {
    fn from_row(row: &Row) -> Result<Self> {
        let testament = row
            .text("testament")?
            .parse()
            .map_err(|_| Error::decode("testament", "testament code"))?;
        Ok(Self {
            id: row.u32("id")?,
            name: row.text("name")?,
            testament,
            chapters: row.u32("chapters")?,
            abbreviation: row.text("abbreviation")?,
            order: row.u32("book_order")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testament_round_trip_through_sql_text() {
        for t in [
            Testament::Ot,
            Testament::Nt,
            Testament::Apocrypha,
            Testament::Quran,
            Testament::Torah,
        ] {
            assert_eq!(t.as_sql().parse::<Testament>().unwrap(), t);
        }
    }

    #[test]
    fn test_testament_parse_is_case_insensitive() {
        assert_eq!("nt".parse::<Testament>().unwrap(), Testament::Nt);
        assert!("gospel".parse::<Testament>().is_err());
    }
}
