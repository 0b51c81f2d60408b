//! Hymnal accessors.

use crate::args;
use crate::error::Result;
use crate::model::Hymn;
use crate::schema::{count, decode_all, decode_first, Store};

use super::like_pattern;

const HYMN_COLUMNS: &str = "number, title, lyrics, category";

pub fn all(store: &dyn Store) -> Result<Vec<Hymn>> {
    let rows = store.query_all(
        &format!("SELECT {HYMN_COLUMNS} FROM hymns ORDER BY number"),
        &[],
    )?;
    decode_all(rows)
}

pub fn by_number(store: &dyn Store, number: u32) -> Result<Option<Hymn>> {
    let row = store.query_first(
        &format!("SELECT {HYMN_COLUMNS} FROM hymns WHERE number = ?1"),
        &args![number],
    )?;
    decode_first(row)
}

/// Match `needle` against title or lyrics, case-insensitively.
pub fn search(store: &dyn Store, needle: &str) -> Result<Vec<Hymn>> {
    let rows = store.query_all(
        &format!(
            "SELECT {HYMN_COLUMNS} FROM hymns
             WHERE LOWER(title) LIKE LOWER(?1) ESCAPE '\\'
                OR LOWER(lyrics) LIKE LOWER(?1) ESCAPE '\\'
             ORDER BY number"
        ),
        &args![like_pattern(needle)],
    )?;
    decode_all(rows)
}

pub fn by_category(store: &dyn Store, category: &str) -> Result<Vec<Hymn>> {
    let rows = store.query_all(
        &format!("SELECT {HYMN_COLUMNS} FROM hymns WHERE category = ?1 ORDER BY number"),
        &args![category],
    )?;
    decode_all(rows)
}

pub fn total(store: &dyn Store) -> Result<u64> {
    count(store, "SELECT COUNT(*) AS count FROM hymns", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    fn seed(db: &Database) {
        for (number, title, lyrics, category) in [
            (2, "Ao Deus de Abraão louvai", "Ao Deus de Abraão louvai", Some("Louvor")),
            (1, "Chuvas de Graça", "Deus prometeu com certeza", Some("Avivamento")),
            (3, "Firme nas promessas", "Firme nas promessas do meu Salvador", None),
        ] {
            db.run(
                "INSERT INTO hymns (number, title, lyrics, category) VALUES (?1, ?2, ?3, ?4)",
                &args![number as u32, title, lyrics, category],
            )
            .unwrap();
        }
    }

    #[test]
    fn test_all_ordered_by_number() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let numbers: Vec<u32> = all(&db).unwrap().iter().map(|h| h.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(total(&db).unwrap(), 3);
    }

    #[test]
    fn test_lookup_and_category() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        assert_eq!(by_number(&db, 1).unwrap().unwrap().title, "Chuvas de Graça");
        assert!(by_number(&db, 99).unwrap().is_none());
        assert_eq!(by_category(&db, "Louvor").unwrap().len(), 1);
        assert_eq!(by_number(&db, 3).unwrap().unwrap().category, None);
    }

    #[test]
    fn test_search_title_and_lyrics() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        assert_eq!(search(&db, "chuvas").unwrap().len(), 1);
        assert_eq!(search(&db, "PROMESSAS").unwrap().len(), 1);
        assert_eq!(search(&db, "deus").unwrap().len(), 2);
    }
}
