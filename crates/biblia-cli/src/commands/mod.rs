pub mod annotate;
pub mod backup;
pub mod config;
pub mod fetch;
pub mod load;
pub mod read;
pub mod reading;
pub mod status;

pub use load::{run_init, run_load};
pub use status::show_status;

use anyhow::{Context, Result};

use biblia_core::canon;
use biblia_core::model::VerseRef;
use biblia_core::schema::Database;
use biblia_etl::Config;

/// Open the configured database, creating its directory if needed.
pub fn open_store(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("Failed to open database {}", config.database_path.display()))
}

/// Resolve a book given as an id (`43`) or a corpus code (`jo`, `tb`).
pub fn resolve_book(raw: &str) -> Result<&'static canon::CanonBook> {
    let id = match raw.parse::<u32>() {
        Ok(id) => Some(id),
        Err(_) => canon::bible_book_id(raw).or_else(|| canon::apocrypha_book_id(raw)),
    };
    id.and_then(canon::by_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown book: {raw}"))
}

pub fn verse_ref(book: &str, chapter: u32, verse: u32) -> Result<VerseRef> {
    Ok(VerseRef::new(resolve_book(book)?.id, chapter, verse))
}

/// `João 3:16` style label.
pub fn label(verse: VerseRef) -> String {
    let name = canon::by_id(verse.book_id).map_or("?", |b| b.name);
    format!("{} {}:{}", name, verse.chapter, verse.verse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_book() {
        assert_eq!(resolve_book("43").unwrap().name, "João");
        assert_eq!(resolve_book("gn").unwrap().id, 1);
        assert_eq!(resolve_book("TB").unwrap().id, 67);
        assert!(resolve_book("999").is_err());
        assert!(resolve_book("xyz").is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(label(VerseRef::new(43, 3, 16)), "João 3:16");
    }
}
