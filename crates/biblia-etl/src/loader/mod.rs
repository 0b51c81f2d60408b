//! Corpus loaders.
//!
//! Each loader reads one bundled corpus, resolves external identifiers to
//! canonical ids, and upserts rows through a [`BatchWriter`] inside one
//! transaction per unit (book, surah, or batch of hymns/materials). Reloading
//! the same corpus replaces text and never duplicates rows.
//!
//! The public `load_*` functions never return an error: failures are logged
//! and reported as [`LoadStatus::Failed`], and the caller decides whether a
//! missing corpus matters. The `try_load_*` functions return the error.
//!
//! [`BatchWriter`]: crate::batch::BatchWriter

pub mod apocrypha;
pub mod bible;
pub mod hymns;
pub mod materials;
pub mod quran;

use serde::Serialize;
use std::path::Path;

use biblia_core::model::DEFAULT_VERSION;
use biblia_core::schema::Store;

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::LoadResult;

/// Progress callback: `(units processed, total units, name of the unit just finished)`.
pub type ProgressFn<'a> = dyn FnMut(usize, usize, &str) + 'a;

/// Knobs shared by every loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Version code written to scripture rows.
    pub version: String,
    pub batch_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl From<&Config> for LoadOptions {
    fn from(config: &Config) -> Self {
        Self {
            version: config.version.clone(),
            batch_size: config.batch_size,
        }
    }
}

/// What a successful load wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub corpus: Corpus,
    /// Books, surahs, hymns or materials written.
    pub units: usize,
    /// Rows upserted.
    pub rows: u64,
    /// External codes with no canonical mapping.
    pub skipped: Vec<String>,
}

impl LoadReport {
    fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            units: 0,
            rows: 0,
            skipped: Vec::new(),
        }
    }
}

/// Outcome of a public loader call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded(LoadReport),
    /// The completeness oracle reported the corpus present; nothing ran.
    AlreadyLoaded,
    Failed { reason: String },
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Run the loader for `corpus` on the file at `path`.
pub fn load_corpus(
    store: &dyn Store,
    corpus: Corpus,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    match corpus {
        Corpus::Bible => bible::load_bible(store, path, options, progress),
        Corpus::Apocrypha => apocrypha::load_apocrypha(store, path, options, progress),
        Corpus::Quran => quran::load_quran(store, path, options, progress),
        Corpus::Hymns => hymns::load_hymns(store, path, options, progress),
        Corpus::Materials => materials::load_materials(store, path, options, progress),
    }
}

/// Turn a loader result into a [`LoadStatus`], logging the outcome.
pub(crate) fn finish(corpus: Corpus, path: &Path, result: LoadResult<LoadReport>) -> LoadStatus {
    match result {
        Ok(report) => {
            log::info!(
                "Loaded {}: {} units, {} rows ({} skipped)",
                corpus,
                report.units,
                report.rows,
                report.skipped.len()
            );
            LoadStatus::Loaded(report)
        }
        Err(e) if e.is_missing() => {
            log::warn!("{} corpus unavailable at {}: {}", corpus, path.display(), e);
            LoadStatus::Failed {
                reason: e.to_string(),
            }
        }
        Err(e) => {
            log::error!("Failed to load {} corpus: {}", corpus, e);
            LoadStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// 1-based position of an array index.
pub(crate) fn position(idx: usize) -> u32 {
    u32::try_from(idx + 1).unwrap_or(u32::MAX)
}

pub(crate) fn report_progress(
    progress: &mut Option<&mut ProgressFn<'_>>,
    processed: usize,
    total: usize,
    name: &str,
) {
    if let Some(callback) = progress.as_mut() {
        callback(processed, total, name);
    }
}
