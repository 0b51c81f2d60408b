//! Reading progress derived from history against the canon chapter counts.

use serde::Serialize;

use crate::args;
use crate::canon;
use crate::content;
use crate::error::Result;
use crate::schema::{count, Store};

use super::history::{self, HistoryStats};
use super::ratio_percent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadingProgress {
    pub chapters_read: u64,
    pub total_chapters: u32,
    pub percentage: f64,
    pub books_completed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookProgress {
    pub book_id: u32,
    pub chapters_read: u64,
    pub total_chapters: u32,
    pub percentage: f64,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedStats {
    pub overall: ReadingProgress,
    pub history: HistoryStats,
    pub ot_percentage: f64,
    pub nt_percentage: f64,
}

/// Distinct chapters read within canonical books 1–66, plus how many of those
/// books have every chapter read.
pub fn overall(store: &dyn Store) -> Result<ReadingProgress> {
    let (first, last) = (*canon::CANONICAL_IDS.start(), *canon::CANONICAL_IDS.end());
    let chapters_read = chapters_read_between(store, first, last)?;
    let books_completed = count(
        store,
        "SELECT COUNT(*) AS count FROM (
             SELECT h.book_id
             FROM reading_history h JOIN books b ON b.id = h.book_id
             WHERE h.book_id BETWEEN ?1 AND ?2
             GROUP BY h.book_id, b.chapters
             HAVING COUNT(DISTINCT h.chapter_number) >= b.chapters
         )",
        &args![first, last],
    )?;
    Ok(ReadingProgress {
        chapters_read,
        total_chapters: canon::TOTAL_CHAPTERS,
        percentage: ratio_percent(chapters_read, u64::from(canon::TOTAL_CHAPTERS)),
        books_completed,
    })
}

/// Progress through one book; `None` for an unknown book id.
pub fn book(store: &dyn Store, book_id: u32) -> Result<Option<BookProgress>> {
    let Some(book) = content::book(store, book_id)? else {
        return Ok(None);
    };
    let chapters_read = count(
        store,
        "SELECT COUNT(DISTINCT chapter_number) AS count FROM reading_history WHERE book_id = ?1",
        &args![book_id],
    )?;
    Ok(Some(BookProgress {
        book_id,
        chapters_read,
        total_chapters: book.chapters,
        percentage: ratio_percent(chapters_read, u64::from(book.chapters)),
        is_completed: chapters_read >= u64::from(book.chapters),
    }))
}

pub fn detailed(store: &dyn Store) -> Result<DetailedStats> {
    let ot = chapters_read_between(store, *canon::OT_IDS.start(), *canon::OT_IDS.end())?;
    let nt = chapters_read_between(store, *canon::NT_IDS.start(), *canon::NT_IDS.end())?;
    Ok(DetailedStats {
        overall: overall(store)?,
        history: history::stats(store)?,
        ot_percentage: ratio_percent(ot, u64::from(canon::OT_CHAPTERS)),
        nt_percentage: ratio_percent(nt, u64::from(canon::NT_CHAPTERS)),
    })
}

fn chapters_read_between(store: &dyn Store, first: u32, last: u32) -> Result<u64> {
    count(
        store,
        "SELECT COUNT(DISTINCT book_id || '-' || chapter_number) AS count
         FROM reading_history WHERE book_id BETWEEN ?1 AND ?2",
        &args![first, last],
    )
}
