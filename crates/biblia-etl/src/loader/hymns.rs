//! Hymnal loader, keyed on hymn number.

use std::path::Path;

use biblia_core::args;
use biblia_core::schema::Store;

use crate::batch::{BatchWriter, HYMNS};
use crate::corpus::{read_corpus, Corpus, HymnEntry};
use crate::error::LoadResult;

use super::{finish, report_progress, LoadOptions, LoadReport, LoadStatus, ProgressFn};

pub fn load_hymns(
    store: &dyn Store,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    log::info!("Loading hymns from {}", path.display());
    let result = read_corpus::<HymnEntry>(path)
        .and_then(|hymns| try_load_hymns(store, &hymns, options, progress));
    finish(Corpus::Hymns, path, result)
}

/// Each chunk of `batch_size` hymns is written in its own transaction.
pub fn try_load_hymns(
    store: &dyn Store,
    hymns: &[HymnEntry],
    options: &LoadOptions,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    let mut report = LoadReport::new(Corpus::Hymns);
    let total = hymns.len();
    for chunk in hymns.chunks(options.batch_size.max(1)) {
        let mut written = 0;
        store.transaction(&mut |tx| {
            let mut writer = BatchWriter::new(tx, &HYMNS, options.batch_size);
            for hymn in chunk {
                writer.push(args![
                    hymn.number,
                    &hymn.title,
                    &hymn.lyrics,
                    hymn.category.as_deref(),
                ])?;
            }
            written = writer.finish()?;
            Ok(())
        })?;

        report.units += chunk.len();
        report.rows += written;
        if let Some(last) = chunk.last() {
            report_progress(&mut progress, report.units, total, &last.title);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblia_core::content;
    use biblia_core::schema::Database;

    fn hymn(number: u32, title: &str) -> HymnEntry {
        HymnEntry {
            number,
            title: title.to_string(),
            lyrics: format!("{title}\nletra"),
            category: None,
        }
    }

    #[test]
    fn test_chunks_and_last_write_wins() {
        let db = Database::open_in_memory().unwrap();
        let hymns: Vec<HymnEntry> = (1..=25).map(|n| hymn(n, &format!("Hino {n}"))).collect();
        let options = LoadOptions {
            batch_size: 10,
            ..LoadOptions::default()
        };
        let mut chunks = 0;
        let mut count_chunks = |_: usize, _: usize, _: &str| chunks += 1;
        let report = try_load_hymns(&db, &hymns, &options, Some(&mut count_chunks)).unwrap();
        assert_eq!(report.units, 25);
        assert_eq!(chunks, 3);

        try_load_hymns(&db, &[hymn(1, "Chuvas de Graça")], &options, None).unwrap();
        assert_eq!(content::hymns::total(&db).unwrap(), 25);
        assert_eq!(
            content::hymns::by_number(&db, 1).unwrap().unwrap().title,
            "Chuvas de Graça"
        );
    }
}
