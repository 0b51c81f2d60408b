//! Apocrypha corpus loader. Same file shape as the Bible, with book codes
//! mapped into ids 67–73.

use std::path::Path;

use biblia_core::canon;
use biblia_core::schema::Store;

use crate::corpus::{read_corpus, Corpus, ScriptureBook};
use crate::error::LoadResult;

use super::bible::load_scripture;
use super::{finish, LoadOptions, LoadReport, LoadStatus, ProgressFn};

pub fn load_apocrypha(
    store: &dyn Store,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    log::info!("Loading Apocrypha corpus from {}", path.display());
    let result = read_corpus::<ScriptureBook>(path)
        .and_then(|books| try_load_apocrypha(store, &books, options, progress));
    finish(Corpus::Apocrypha, path, result)
}

pub fn try_load_apocrypha(
    store: &dyn Store,
    books: &[ScriptureBook],
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    load_scripture(
        store,
        Corpus::Apocrypha,
        books,
        canon::apocrypha_book_id,
        options,
        progress,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblia_core::content;
    use biblia_core::schema::Database;

    #[test]
    fn test_codes_map_into_apocrypha_range() {
        let db = Database::open_in_memory().unwrap();
        let books = vec![
            ScriptureBook {
                abbrev: "tb".to_string(),
                name: Some("Tobias".to_string()),
                chapters: vec![vec!["Livro das palavras de Tobias".to_string()]],
            },
            ScriptureBook {
                abbrev: "gn".to_string(),
                name: None,
                chapters: vec![vec!["No princípio".to_string()]],
            },
        ];
        let report = try_load_apocrypha(&db, &books, &LoadOptions::default(), None).unwrap();
        assert_eq!(report.units, 1);
        assert_eq!(report.skipped, vec!["gn".to_string()]);
        assert!(content::verse(&db, 67, 1, 1, "acf").unwrap().is_some());
        assert!(content::verse(&db, 1, 1, 1, "acf").unwrap().is_none());
    }
}
