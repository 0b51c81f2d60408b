//! Completeness oracle.
//!
//! Cheap aggregate checks against the fixed canonical totals. Loaders consult
//! these before running, which makes them the offline-readiness gate.
//!
//! The "loaded" policy is approximate: more than [`LOADED_THRESHOLD`] verses
//! counts as loaded, so an interrupted load that got past the threshold is
//! never resumed by the bootstrap. Callers that need a strict answer should
//! use [`BibleStats::readiness`].

use serde::Serialize;

use crate::args;
use crate::canon;
use crate::error::Result;
use crate::schema::{count, Store};

/// Verse count above which the Bible corpus is treated as loaded.
pub const LOADED_THRESHOLD: u64 = 1_000;
/// Verse count at which the Bible is reported offline-complete.
pub const COMPLETE_THRESHOLD: u64 = 31_000;
/// Verse count above which the Apocrypha corpus is treated as loaded.
pub const APOCRYPHA_THRESHOLD: u64 = 100;

/// Loaded counts for one Bible version over canonical books 1–66.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BibleStats {
    pub books_loaded: u64,
    pub chapters_loaded: u64,
    pub total_verses: u64,
}

/// Whether the Bible can be read entirely offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum OfflineReadiness {
    Complete,
    Partial { missing: u64 },
    Empty,
}

impl BibleStats {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.total_verses > LOADED_THRESHOLD
    }

    /// Share of [`canon::TOTAL_VERSES`] present, capped at 100 and rounded to
    /// one decimal.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage(self.total_verses, u64::from(canon::TOTAL_VERSES))
    }

    #[must_use]
    pub fn readiness(&self) -> OfflineReadiness {
        match self.total_verses {
            0 => OfflineReadiness::Empty,
            n if n >= COMPLETE_THRESHOLD => OfflineReadiness::Complete,
            n => OfflineReadiness::Partial {
                missing: u64::from(canon::TOTAL_VERSES).saturating_sub(n),
            },
        }
    }
}

/// `min(100, part / whole * 100)` rounded to one decimal.
#[must_use]
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64 * 100.0).min(100.0);
    (raw * 10.0).round() / 10.0
}

pub fn bible_stats(store: &dyn Store, version: &str) -> Result<BibleStats> {
    let (first, last) = (*canon::CANONICAL_IDS.start(), *canon::CANONICAL_IDS.end());
    let scope = "FROM verses WHERE version_id = ?1 AND book_id BETWEEN ?2 AND ?3";
    let params = args![version, first, last];

    let books_loaded = count(
        store,
        &format!("SELECT COUNT(DISTINCT book_id) AS count {scope}"),
        &params,
    )?;
    let chapters_loaded = count(
        store,
        &format!("SELECT COUNT(DISTINCT book_id || '-' || chapter_number) AS count {scope}"),
        &params,
    )?;
    let total_verses = count(store, &format!("SELECT COUNT(*) AS count {scope}"), &params)?;

    let stats = BibleStats {
        books_loaded,
        chapters_loaded,
        total_verses,
    };
    log::debug!("Bible stats for {}: {:?}", version, stats);
    Ok(stats)
}

pub fn is_bible_loaded(store: &dyn Store, version: &str) -> Result<bool> {
    Ok(bible_stats(store, version)?.is_loaded())
}

/// Verses stored for Apocrypha book ids, across all versions.
pub fn apocrypha_stats(store: &dyn Store) -> Result<u64> {
    count(
        store,
        "SELECT COUNT(*) AS count FROM verses WHERE book_id BETWEEN ?1 AND ?2",
        &args![*canon::APOCRYPHA_IDS.start(), *canon::APOCRYPHA_IDS.end()],
    )
}

pub fn is_apocrypha_loaded(store: &dyn Store) -> Result<bool> {
    Ok(apocrypha_stats(store)? > APOCRYPHA_THRESHOLD)
}

pub fn quran_stats(store: &dyn Store) -> Result<u64> {
    crate::content::quran::total(store)
}

pub fn is_quran_loaded(store: &dyn Store) -> Result<bool> {
    Ok(quran_stats(store)? > 0)
}

pub fn hymn_stats(store: &dyn Store) -> Result<u64> {
    crate::content::hymns::total(store)
}

pub fn are_hymns_loaded(store: &dyn Store) -> Result<bool> {
    Ok(hymn_stats(store)? > 0)
}

pub fn material_stats(store: &dyn Store) -> Result<u64> {
    crate::content::materials::total(store)
}

pub fn are_materials_loaded(store: &dyn Store) -> Result<bool> {
    Ok(material_stats(store)? > 0)
}
