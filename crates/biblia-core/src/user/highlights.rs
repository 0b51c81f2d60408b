use crate::args;
use crate::error::Result;
use crate::model::{Highlight, HighlightColor, HighlightId, VerseRef};
use crate::schema::{count, decode_all, decode_first, Store};

use super::now_timestamp;

/// Highlight a verse, replacing any highlight it already has.
///
/// The delete and insert run in one transaction, so a verse never carries
/// two highlights and never loses its old one without gaining the new one.
pub fn set(store: &dyn Store, verse: VerseRef, color: HighlightColor) -> Result<HighlightId> {
    let id = HighlightId::new();
    let created_at = now_timestamp();
    store.transaction(&mut |tx| {
        tx.run(
            "DELETE FROM verse_highlights
             WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3",
            &args![verse.book_id, verse.chapter, verse.verse],
        )?;
        tx.run(
            "INSERT INTO verse_highlights (id, book_id, chapter_number, verse_number, color, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            &args![
                id.as_str(),
                verse.book_id,
                verse.chapter,
                verse.verse,
                color.as_str(),
                created_at.as_str(),
            ],
        )?;
        Ok(())
    })?;
    log::info!("Highlight {} set on {}", color, verse);
    Ok(id)
}

/// Returns whether the verse had a highlight.
pub fn remove(store: &dyn Store, verse: VerseRef) -> Result<bool> {
    let result = store.run(
        "DELETE FROM verse_highlights
         WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3",
        &args![verse.book_id, verse.chapter, verse.verse],
    )?;
    Ok(result.changes > 0)
}

pub fn for_chapter(store: &dyn Store, book_id: u32, chapter: u32) -> Result<Vec<Highlight>> {
    let rows = store.query_all(
        "SELECT * FROM verse_highlights WHERE book_id = ?1 AND chapter_number = ?2 ORDER BY verse_number",
        &args![book_id, chapter],
    )?;
    decode_all(rows)
}

pub fn for_verse(store: &dyn Store, verse: VerseRef) -> Result<Option<Highlight>> {
    let row = store.query_first(
        "SELECT * FROM verse_highlights
         WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3",
        &args![verse.book_id, verse.chapter, verse.verse],
    )?;
    decode_first(row)
}

/// All highlights, newest first.
pub fn list(store: &dyn Store) -> Result<Vec<Highlight>> {
    let rows = store.query_all("SELECT * FROM verse_highlights ORDER BY created_at DESC", &[])?;
    decode_all(rows)
}

pub fn total(store: &dyn Store) -> Result<u64> {
    count(store, "SELECT COUNT(*) AS count FROM verse_highlights", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    const PSALM_23_1: VerseRef = VerseRef::new(19, 23, 1);

    #[test]
    fn test_second_highlight_replaces_first() {
        let db = Database::open_in_memory().unwrap();
        set(&db, PSALM_23_1, HighlightColor::Yellow).unwrap();
        let second = set(&db, PSALM_23_1, HighlightColor::Blue).unwrap();

        assert_eq!(total(&db).unwrap(), 1);
        let stored = for_verse(&db, PSALM_23_1).unwrap().unwrap();
        assert_eq!(stored.color, HighlightColor::Blue);
        assert_eq!(stored.id, second);
    }

    #[test]
    fn test_chapter_highlights() {
        let db = Database::open_in_memory().unwrap();
        set(&db, VerseRef::new(19, 23, 4), HighlightColor::Green).unwrap();
        set(&db, PSALM_23_1, HighlightColor::Pink).unwrap();
        set(&db, VerseRef::new(19, 24, 1), HighlightColor::Orange).unwrap();

        let chapter = for_chapter(&db, 19, 23).unwrap();
        assert_eq!(chapter.len(), 2);
        assert_eq!(chapter[0].verse.verse, 1);
        assert_eq!(list(&db).unwrap().len(), 3);
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        set(&db, PSALM_23_1, HighlightColor::Yellow).unwrap();
        assert!(remove(&db, PSALM_23_1).unwrap());
        assert!(!remove(&db, PSALM_23_1).unwrap());
        assert!(for_verse(&db, PSALM_23_1).unwrap().is_none());
    }
}
