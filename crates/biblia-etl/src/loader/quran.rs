//! Quran corpus loader: one transaction per surah, keyed on (surah, verse).

use std::path::Path;

use biblia_core::args;
use biblia_core::schema::Store;

use crate::batch::{BatchWriter, QURAN_VERSES};
use crate::corpus::{read_corpus, Corpus, QuranSurah};
use crate::error::{LoadError, LoadResult};

use super::{finish, report_progress, LoadOptions, LoadReport, LoadStatus, ProgressFn};

pub fn load_quran(
    store: &dyn Store,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    log::info!("Loading Quran corpus from {}", path.display());
    let result = read_corpus::<QuranSurah>(path)
        .and_then(|surahs| try_load_quran(store, &surahs, options, progress));
    finish(Corpus::Quran, path, result)
}

pub fn try_load_quran(
    store: &dyn Store,
    surahs: &[QuranSurah],
    options: &LoadOptions,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    if let Some(empty) = surahs.iter().find(|s| s.verses.is_empty()) {
        return Err(LoadError::EmptyBook {
            code: format!("surah {}", empty.number),
        });
    }

    let mut report = LoadReport::new(Corpus::Quran);
    let total = surahs.len();
    for surah in surahs {
        let mut written = 0;
        store.transaction(&mut |tx| {
            let mut writer = BatchWriter::new(tx, &QURAN_VERSES, options.batch_size);
            for verse in &surah.verses {
                writer.push(args![
                    surah.number,
                    verse.number,
                    &verse.text_arabic,
                    &verse.text_portuguese,
                ])?;
            }
            written = writer.finish()?;
            Ok(())
        })?;

        report.units += 1;
        report.rows += written;
        log::debug!("Loaded surah {} - {} ({} verses)", surah.number, surah.name, written);
        report_progress(&mut progress, report.units, total, &surah.name);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::QuranVerseEntry;
    use biblia_core::content;
    use biblia_core::schema::Database;

    fn surah(number: u32, verses: u32) -> QuranSurah {
        QuranSurah {
            number,
            name: format!("Surata {number}"),
            name_arabic: None,
            verses: (1..=verses)
                .map(|n| QuranVerseEntry {
                    number: n,
                    text_arabic: "نص".to_string(),
                    text_portuguese: format!("versículo {n}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_load_and_reload() {
        let db = Database::open_in_memory().unwrap();
        let surahs = [surah(1, 7), surah(114, 6)];
        let report = try_load_quran(&db, &surahs, &LoadOptions::default(), None).unwrap();
        assert_eq!(report.units, 2);
        assert_eq!(report.rows, 13);

        try_load_quran(&db, &surahs, &LoadOptions::default(), None).unwrap();
        assert_eq!(content::quran::total(&db).unwrap(), 13);
        assert_eq!(content::quran::surah(&db, 1).unwrap().len(), 7);
    }

    #[test]
    fn test_empty_surah_rejected() {
        let db = Database::open_in_memory().unwrap();
        let err = try_load_quran(&db, &[surah(2, 0)], &LoadOptions::default(), None).unwrap_err();
        assert!(matches!(err, LoadError::EmptyBook { .. }));
    }
}
