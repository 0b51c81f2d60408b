use crate::args;
use crate::error::Result;
use crate::model::{Bookmark, BookmarkId, VerseRef};
use crate::schema::{count, decode_all, decode_first, Store};

use super::now_timestamp;

/// Bookmark a verse. A verse may carry several bookmarks.
pub fn add(store: &dyn Store, verse: VerseRef, note: Option<&str>) -> Result<BookmarkId> {
    let id = BookmarkId::new();
    store.run(
        "INSERT INTO bookmarks (id, book_id, chapter_number, verse_number, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        &args![
            id.as_str(),
            verse.book_id,
            verse.chapter,
            verse.verse,
            note,
            now_timestamp(),
        ],
    )?;
    log::info!("Bookmark added: {} at {}", id, verse);
    Ok(id)
}

/// Returns whether a bookmark was deleted.
pub fn remove(store: &dyn Store, id: &BookmarkId) -> Result<bool> {
    let result = store.run("DELETE FROM bookmarks WHERE id = ?1", &args![id.as_str()])?;
    Ok(result.changes > 0)
}

/// Delete every bookmark on `verse`, returning how many went.
pub fn remove_for_verse(store: &dyn Store, verse: VerseRef) -> Result<u64> {
    let result = store.run(
        "DELETE FROM bookmarks WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3",
        &args![verse.book_id, verse.chapter, verse.verse],
    )?;
    Ok(result.changes)
}

/// All bookmarks, newest first.
pub fn list(store: &dyn Store) -> Result<Vec<Bookmark>> {
    let rows = store.query_all("SELECT * FROM bookmarks ORDER BY created_at DESC", &[])?;
    decode_all(rows)
}

pub fn is_bookmarked(store: &dyn Store, verse: VerseRef) -> Result<bool> {
    let n = count(
        store,
        "SELECT COUNT(*) AS count FROM bookmarks
         WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3",
        &args![verse.book_id, verse.chapter, verse.verse],
    )?;
    Ok(n > 0)
}

pub fn for_verse(store: &dyn Store, verse: VerseRef) -> Result<Option<Bookmark>> {
    let row = store.query_first(
        "SELECT * FROM bookmarks
         WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3
         ORDER BY created_at DESC",
        &args![verse.book_id, verse.chapter, verse.verse],
    )?;
    decode_first(row)
}

/// Returns whether the bookmark existed.
pub fn update_note(store: &dyn Store, id: &BookmarkId, note: &str) -> Result<bool> {
    let result = store.run(
        "UPDATE bookmarks SET note = ?1 WHERE id = ?2",
        &args![note, id.as_str()],
    )?;
    Ok(result.changes > 0)
}

pub fn total(store: &dyn Store) -> Result<u64> {
    count(store, "SELECT COUNT(*) AS count FROM bookmarks", &[])
}
