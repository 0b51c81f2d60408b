//! Startup sequence: make sure every bundled corpus is in the store.
//!
//! The schema is applied by [`Database::open`](biblia_core::schema::Database::open).
//! For each corpus, in [`Corpus::ALL`] order, the completeness oracle is
//! asked first and the loader runs only when the oracle says "not loaded".
//! One corpus failing never stops the others.

use serde::Serialize;
use std::path::Path;

use biblia_core::completeness;
use biblia_core::schema::Store;
use biblia_core::user::plans;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::loader::{load_corpus, LoadOptions, LoadStatus};

/// Progress callback: `(corpus, processed, total, unit name)`.
pub type BootstrapProgressFn<'a> = dyn FnMut(Corpus, usize, usize, &str) + 'a;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusOutcome {
    pub corpus: Corpus,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub corpora: Vec<CorpusOutcome>,
    /// The chronological reading plan was seeded by this run.
    pub plan_seeded: bool,
}

impl BootstrapReport {
    pub fn status(&self, corpus: Corpus) -> Option<&LoadStatus> {
        self.corpora
            .iter()
            .find(|o| o.corpus == corpus)
            .map(|o| &o.status)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CorpusOutcome> {
        self.corpora.iter().filter(|o| o.status.is_failed())
    }
}

/// Ask the oracle whether `corpus` is already present.
///
/// # Errors
/// Returns the store error if an aggregate query fails.
pub fn is_loaded(store: &dyn Store, corpus: Corpus, version: &str) -> biblia_core::Result<bool> {
    match corpus {
        Corpus::Bible => completeness::is_bible_loaded(store, version),
        Corpus::Apocrypha => completeness::is_apocrypha_loaded(store),
        Corpus::Quran => completeness::is_quran_loaded(store),
        Corpus::Hymns => completeness::are_hymns_loaded(store),
        Corpus::Materials => completeness::are_materials_loaded(store),
    }
}

/// Run the startup sequence using paths and options from `config`.
pub fn run(store: &dyn Store, config: &Config, progress: Option<&mut BootstrapProgressFn<'_>>) -> BootstrapReport {
    run_with(store, &config.corpus_dir, &LoadOptions::from(config), progress)
}

/// Run the startup sequence against corpus files in `corpus_dir`.
pub fn run_with(
    store: &dyn Store,
    corpus_dir: &Path,
    options: &LoadOptions,
    mut progress: Option<&mut BootstrapProgressFn<'_>>,
) -> BootstrapReport {
    log::info!("Bootstrapping from {}", corpus_dir.display());
    let mut report = BootstrapReport::default();

    for corpus in Corpus::ALL {
        let loaded = is_loaded(store, corpus, &options.version).unwrap_or_else(|e| {
            log::warn!("Could not check {corpus} completeness, loading anyway: {e}");
            false
        });

        let status = if loaded {
            log::info!("{corpus} already loaded, skipping");
            LoadStatus::AlreadyLoaded
        } else {
            let path = corpus_dir.join(corpus.file_name());
            match progress.as_mut() {
                Some(callback) => {
                    let mut forward = |done: usize, total: usize, name: &str| callback(corpus, done, total, name);
                    load_corpus(store, corpus, &path, options, Some(&mut forward))
                }
                None => load_corpus(store, corpus, &path, options, None),
            }
        };
        report.corpora.push(CorpusOutcome { corpus, status });
    }

    report.plan_seeded = match plans::initialize_chronological(store) {
        Ok(seeded) => seeded,
        Err(e) => {
            log::error!("Failed to seed the chronological reading plan: {e}");
            false
        }
    };

    let failed = report.failures().count();
    if failed > 0 {
        log::warn!("Bootstrap finished with {failed} unavailable corpora");
    } else {
        log::info!("Bootstrap finished");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblia_core::schema::{Database, NullStore};
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_fails_each_corpus_without_panic() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let report = run_with(&db, temp_dir.path(), &LoadOptions::default(), None);

        assert_eq!(report.corpora.len(), Corpus::ALL.len());
        assert_eq!(report.failures().count(), Corpus::ALL.len());
        assert!(report.plan_seeded);
    }

    #[test]
    fn test_hymns_skipped_when_present() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("hymns.json"),
            r#"[{"number": 1, "title": "Chuvas de Graça", "lyrics": "..."}]"#,
        )
        .unwrap();
        let db = Database::open_in_memory().unwrap();

        let first = run_with(&db, temp_dir.path(), &LoadOptions::default(), None);
        assert!(matches!(first.status(Corpus::Hymns), Some(LoadStatus::Loaded(_))));

        let second = run_with(&db, temp_dir.path(), &LoadOptions::default(), None);
        assert_eq!(second.status(Corpus::Hymns), Some(&LoadStatus::AlreadyLoaded));
        assert!(!second.plan_seeded);
    }

    #[test]
    fn test_progress_is_tagged_with_corpus() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("quran.json"),
            r#"[{"number": 1, "name": "Al-Fatiha",
                 "verses": [{"number": 1, "textArabic": "بِسْمِ", "textPortuguese": "Em nome"}]}]"#,
        )
        .unwrap();
        let db = Database::open_in_memory().unwrap();
        let mut seen = Vec::new();
        let mut record = |corpus: Corpus, done: usize, total: usize, _: &str| seen.push((corpus, done, total));
        run_with(&db, temp_dir.path(), &LoadOptions::default(), Some(&mut record));
        assert_eq!(seen, vec![(Corpus::Quran, 1, 1)]);
    }

    #[test]
    fn test_null_store_never_reports_loaded() {
        let store = NullStore::new();
        for corpus in Corpus::ALL {
            assert!(!is_loaded(&store, corpus, "acf").unwrap());
        }
    }
}
