//! Read paths over the content tables.
//!
//! An empty result is a normal outcome: for a chapter it means "not yet
//! downloaded", and callers decide whether to reach for the remote fetcher.

pub mod hymns;
pub mod materials;
pub mod quran;

use crate::args;
use crate::canon;
use crate::error::Result;
use crate::model::{BibleVersion, Book, NewVerse, Testament, Verse};
use crate::schema::{count, decode_all, decode_first, Store};

/// Maximum rows returned by [`search_verses`].
pub const SEARCH_LIMIT: u32 = 100;

const VERSE_COLUMNS: &str = "id, book_id, chapter_number, verse_number, text, version_id";

pub fn versions(store: &dyn Store) -> Result<Vec<BibleVersion>> {
    let rows = store.query_all(
        "SELECT id, name, abbreviation, language, description FROM bible_versions ORDER BY id",
        &[],
    )?;
    decode_all(rows)
}

/// List books, optionally restricted to one collection. The Torah is the
/// first five books rather than a stored testament value.
pub fn books(store: &dyn Store, testament: Option<Testament>) -> Result<Vec<Book>> {
    let rows = match testament {
        None => store.query_all("SELECT * FROM books ORDER BY book_order", &[])?,
        Some(Testament::Torah) => store.query_all(
            "SELECT * FROM books WHERE id BETWEEN ?1 AND ?2 ORDER BY book_order",
            &args![*canon::TORAH_IDS.start(), *canon::TORAH_IDS.end()],
        )?,
        Some(t) => store.query_all(
            "SELECT * FROM books WHERE testament = ?1 ORDER BY book_order",
            &args![t.as_sql()],
        )?,
    };
    decode_all(rows)
}

pub fn book(store: &dyn Store, book_id: u32) -> Result<Option<Book>> {
    let row = store.query_first("SELECT * FROM books WHERE id = ?1", &args![book_id])?;
    decode_first(row)
}

/// Verses of one chapter in verse order. Empty when the chapter has not
/// been loaded for `version`.
pub fn chapter_verses(store: &dyn Store, book_id: u32, chapter: u32, version: &str) -> Result<Vec<Verse>> {
    let rows = store.query_all(
        &format!(
            "SELECT {VERSE_COLUMNS} FROM verses
             WHERE book_id = ?1 AND chapter_number = ?2 AND version_id = ?3
             ORDER BY verse_number"
        ),
        &args![book_id, chapter, version],
    )?;
    let verses: Vec<Verse> = decode_all(rows)?;
    log::debug!(
        "Loaded {} verses for book {}, chapter {}",
        verses.len(),
        book_id,
        chapter
    );
    Ok(verses)
}

pub fn verse(store: &dyn Store, book_id: u32, chapter: u32, verse: u32, version: &str) -> Result<Option<Verse>> {
    let row = store.query_first(
        &format!(
            "SELECT {VERSE_COLUMNS} FROM verses
             WHERE book_id = ?1 AND chapter_number = ?2 AND verse_number = ?3 AND version_id = ?4"
        ),
        &args![book_id, chapter, verse, version],
    )?;
    decode_first(row)
}

/// Case-insensitive substring search over verse text.
///
/// Returns at most [`SEARCH_LIMIT`] rows in storage order; there is no
/// ranking.
pub fn search_verses(store: &dyn Store, needle: &str, version: &str) -> Result<Vec<Verse>> {
    let rows = store.query_all(
        &format!(
            "SELECT {VERSE_COLUMNS} FROM verses
             WHERE version_id = ?1 AND LOWER(text) LIKE LOWER(?2) ESCAPE '\\'
             LIMIT {SEARCH_LIMIT}"
        ),
        &args![version, like_pattern(needle)],
    )?;
    let verses: Vec<Verse> = decode_all(rows)?;
    log::debug!("Search for {:?} found {} results", needle, verses.len());
    Ok(verses)
}

/// A verse picked by the store's `RANDOM()` ordering.
pub fn random_verse(store: &dyn Store, version: &str) -> Result<Option<Verse>> {
    let row = store.query_first(
        &format!("SELECT {VERSE_COLUMNS} FROM verses WHERE version_id = ?1 ORDER BY RANDOM() LIMIT 1"),
        &args![version],
    )?;
    decode_first(row)
}

/// Insert a verse, or replace the text of the verse with the same
/// (book, chapter, verse, version).
pub fn upsert_verse(store: &dyn Store, verse: &NewVerse) -> Result<()> {
    store.run(
        "INSERT INTO verses (book_id, chapter_number, verse_number, text, version_id)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(book_id, chapter_number, verse_number, version_id)
         DO UPDATE SET text = excluded.text",
        &args![verse.book_id, verse.chapter, verse.verse, &verse.text, &verse.version],
    )?;
    Ok(())
}

/// A chapter is downloaded iff at least one of its verses is stored.
pub fn is_chapter_downloaded(store: &dyn Store, book_id: u32, chapter: u32, version: &str) -> Result<bool> {
    let n = count(
        store,
        "SELECT COUNT(*) AS count FROM verses
         WHERE book_id = ?1 AND chapter_number = ?2 AND version_id = ?3",
        &args![book_id, chapter, version],
    )?;
    Ok(n > 0)
}

/// Wrap `needle` in `%…%`, escaping LIKE metacharacters so they match
/// literally.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Database, NullStore};

    fn new_verse(book_id: u32, chapter: u32, verse: u32, text: &str) -> NewVerse {
        NewVerse {
            book_id,
            chapter,
            verse,
            text: text.to_string(),
            version: "acf".to_string(),
        }
    }

    #[test]
    fn test_chapter_verses_ordered() {
        let db = Database::open_in_memory().unwrap();
        upsert_verse(&db, &new_verse(43, 3, 17, "Porque Deus enviou o seu Filho")).unwrap();
        upsert_verse(&db, &new_verse(43, 3, 16, "Porque Deus amou o mundo")).unwrap();

        let verses = chapter_verses(&db, 43, 3, "acf").unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].verse, 16);
        assert_eq!(verses[1].verse, 17);
    }

    #[test]
    fn test_missing_chapter_is_empty_not_error() {
        let db = Database::open_in_memory().unwrap();
        let verses = chapter_verses(&db, 19, 119, "acf").unwrap();
        assert!(verses.is_empty());
        assert!(!is_chapter_downloaded(&db, 19, 119, "acf").unwrap());
    }

    #[test]
    fn test_upsert_keeps_latest_text() {
        let db = Database::open_in_memory().unwrap();
        upsert_verse(&db, &new_verse(1, 1, 1, "first")).unwrap();
        upsert_verse(&db, &new_verse(1, 1, 1, "corrected")).unwrap();

        let stored = verse(&db, 1, 1, 1, "acf").unwrap().unwrap();
        assert_eq!(stored.text, "corrected");
        assert_eq!(chapter_verses(&db, 1, 1, "acf").unwrap().len(), 1);
    }

    #[test]
    fn test_versions_are_independent() {
        let db = Database::open_in_memory().unwrap();
        upsert_verse(&db, &new_verse(1, 1, 1, "No princípio")).unwrap();
        let mut kjv = new_verse(1, 1, 1, "In the beginning");
        kjv.version = "kjv".to_string();
        upsert_verse(&db, &kjv).unwrap();

        assert_eq!(verse(&db, 1, 1, 1, "kjv").unwrap().unwrap().text, "In the beginning");
        assert_eq!(verse(&db, 1, 1, 1, "acf").unwrap().unwrap().text, "No princípio");
    }

    #[test]
    fn test_search_is_case_insensitive_and_capped() {
        let db = Database::open_in_memory().unwrap();
        for v in 1..=150 {
            upsert_verse(&db, &new_verse(19, 1, v, "Bem-aventurado o varão")).unwrap();
        }
        upsert_verse(&db, &new_verse(19, 2, 1, "Por que se amotinam")).unwrap();

        let hits = search_verses(&db, "BEM-AVENTURADO", "acf").unwrap();
        assert_eq!(hits.len(), SEARCH_LIMIT as usize);

        let hits = search_verses(&db, "amotinam", "acf").unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = Database::open_in_memory().unwrap();
        upsert_verse(&db, &new_verse(1, 1, 1, "luz")).unwrap();
        assert!(search_verses(&db, "%", "acf").unwrap().is_empty());
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn test_random_verse() {
        let db = Database::open_in_memory().unwrap();
        assert!(random_verse(&db, "acf").unwrap().is_none());
        upsert_verse(&db, &new_verse(1, 1, 1, "No princípio")).unwrap();
        assert_eq!(random_verse(&db, "acf").unwrap().unwrap().book_id, 1);
    }

    #[test]
    fn test_books_by_testament() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(books(&db, None).unwrap().len(), canon::BOOKS.len());
        assert_eq!(books(&db, Some(Testament::Ot)).unwrap().len(), 39);
        assert_eq!(books(&db, Some(Testament::Nt)).unwrap().len(), 27);
        assert_eq!(books(&db, Some(Testament::Apocrypha)).unwrap().len(), 7);

        let torah = books(&db, Some(Testament::Torah)).unwrap();
        assert_eq!(torah.len(), 5);
        assert_eq!(torah[4].name, "Deuteronômio");
    }

    #[test]
    fn test_book_lookup() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(book(&db, 19).unwrap().unwrap().chapters, 150);
        assert!(book(&db, 999).unwrap().is_none());
    }

    #[test]
    fn test_versions_seeded() {
        let db = Database::open_in_memory().unwrap();
        let ids: Vec<String> = versions(&db).unwrap().into_iter().map(|v| v.id).collect();
        assert!(ids.contains(&"acf".to_string()));
        assert!(ids.contains(&"kjv".to_string()));
    }

    #[test]
    fn test_null_store_answers_canned_reads() {
        let store = NullStore::new();
        let verses = chapter_verses(&store, 1, 1, "acf").unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(random_verse(&store, "acf").unwrap().unwrap().verse, 1);
        assert_eq!(books(&store, Some(Testament::Apocrypha)).unwrap().len(), 7);
    }
}
