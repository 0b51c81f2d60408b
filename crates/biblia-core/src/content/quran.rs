//! Quran accessors. Surahs are numbered 1–114, independently of Bible ids.

use crate::args;
use crate::error::Result;
use crate::model::QuranVerse;
use crate::schema::{count, decode_all, decode_first, Store};

pub const SURAH_COUNT: u32 = 114;

const QURAN_COLUMNS: &str = "surah_number, verse_number, text_arabic, text_portuguese";

/// Verses of one surah in verse order; empty when not loaded.
pub fn surah(store: &dyn Store, surah: u32) -> Result<Vec<QuranVerse>> {
    let rows = store.query_all(
        &format!(
            "SELECT {QURAN_COLUMNS} FROM quran_verses WHERE surah_number = ?1 ORDER BY verse_number"
        ),
        &args![surah],
    )?;
    decode_all(rows)
}

pub fn verse(store: &dyn Store, surah: u32, verse: u32) -> Result<Option<QuranVerse>> {
    let row = store.query_first(
        &format!(
            "SELECT {QURAN_COLUMNS} FROM quran_verses WHERE surah_number = ?1 AND verse_number = ?2"
        ),
        &args![surah, verse],
    )?;
    decode_first(row)
}

pub fn total(store: &dyn Store) -> Result<u64> {
    count(store, "SELECT COUNT(*) AS count FROM quran_verses", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    #[test]
    fn test_surah_in_verse_order() {
        let db = Database::open_in_memory().unwrap();
        for v in [2_u32, 1] {
            db.run(
                "INSERT INTO quran_verses (surah_number, verse_number, text_arabic, text_portuguese)
                 VALUES (?1, ?2, ?3, ?4)",
                &args![1_u32, v, "بِسْمِ اللَّهِ", format!("versículo {v}")],
            )
            .unwrap();
        }
        let verses = surah(&db, 1).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].verse, 1);
        assert_eq!(verse(&db, 1, 2).unwrap().unwrap().text_translated, "versículo 2");
        assert!(surah(&db, 2).unwrap().is_empty());
        assert_eq!(total(&db).unwrap(), 2);
    }
}
