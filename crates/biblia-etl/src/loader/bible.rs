//! Bible corpus loader, and the scripture-loading core it shares with the
//! Apocrypha loader.

use std::path::Path;

use biblia_core::args;
use biblia_core::canon;
use biblia_core::schema::Store;

use crate::batch::{BatchWriter, VERSES};
use crate::corpus::{read_corpus, Corpus, ScriptureBook};
use crate::error::{LoadError, LoadResult};

use super::{finish, position, report_progress, LoadOptions, LoadReport, LoadStatus, ProgressFn};

/// Load `bible.json`-shaped data from `path`. Never fails past this call.
pub fn load_bible(
    store: &dyn Store,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    log::info!("Loading Bible corpus from {}", path.display());
    let result = read_corpus::<ScriptureBook>(path)
        .and_then(|books| try_load_bible(store, &books, options, progress));
    finish(Corpus::Bible, path, result)
}

pub fn try_load_bible(
    store: &dyn Store,
    books: &[ScriptureBook],
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    load_scripture(
        store,
        Corpus::Bible,
        books,
        canon::bible_book_id,
        options,
        progress,
    )
}

/// Resolve, validate, then write each book in its own transaction.
///
/// Validation covers every mapped book before anything is written, so a
/// malformed corpus leaves the store untouched.
pub(crate) fn load_scripture(
    store: &dyn Store,
    corpus: Corpus,
    books: &[ScriptureBook],
    resolve: fn(&str) -> Option<u32>,
    options: &LoadOptions,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    let mut report = LoadReport::new(corpus);
    let mut resolved = Vec::with_capacity(books.len());

    for book in books {
        match resolve(&book.abbrev) {
            Some(book_id) => {
                validate(book)?;
                resolved.push((book_id, book));
            }
            None => {
                log::warn!("Skipping unknown {} book code: {}", corpus, book.abbrev);
                report.skipped.push(book.abbrev.clone());
            }
        }
    }

    let total = books.len();
    for (book_id, book) in resolved {
        let mut written = 0;
        store.transaction(&mut |tx| {
            let mut writer = BatchWriter::new(tx, &VERSES, options.batch_size);
            for (chapter_idx, verses) in book.chapters.iter().enumerate() {
                for (verse_idx, text) in verses.iter().enumerate() {
                    writer.push(args![
                        book_id,
                        position(chapter_idx),
                        position(verse_idx),
                        text,
                        &options.version,
                    ])?;
                }
            }
            written = writer.finish()?;
            Ok(())
        })?;

        report.units += 1;
        report.rows += written;

        let name = canon::by_id(book_id).map_or(book.abbrev.as_str(), |b| b.name);
        log::debug!("Loaded {} ({} verses)", name, written);
        report_progress(&mut progress, report.units, total, name);
    }

    Ok(report)
}

fn validate(book: &ScriptureBook) -> LoadResult<()> {
    if book.chapters.is_empty() {
        return Err(LoadError::EmptyBook {
            code: book.abbrev.clone(),
        });
    }
    if let Some(idx) = book.chapters.iter().position(Vec::is_empty) {
        return Err(LoadError::EmptyChapter {
            code: book.abbrev.clone(),
            chapter: position(idx),
        });
    }
    Ok(())
}
