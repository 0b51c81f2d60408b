//! Reading history, collapsed to one row per chapter per calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::args;
use crate::error::{Error, Result};
use crate::model::{HistoryEntry, HistoryId};
use crate::schema::{count, decode_all, Store};

use super::format_timestamp;

/// Summary figures over the whole history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub chapters_read: u64,
    pub unique_books: u64,
    pub streak: u32,
    pub last_read: Option<DateTime<Utc>>,
}

/// Record a visit to a chapter now.
pub fn record(store: &dyn Store, book_id: u32, chapter: u32) -> Result<HistoryId> {
    record_at(store, book_id, chapter, Utc::now())
}

/// Record a visit at `at`. A second visit to the same chapter on the same
/// day moves that day's row forward instead of adding one.
pub fn record_at(store: &dyn Store, book_id: u32, chapter: u32, at: DateTime<Utc>) -> Result<HistoryId> {
    let timestamp = format_timestamp(at);
    let day_prefix = format!("{}%", at.format("%Y-%m-%d"));

    let existing = store.query_first(
        "SELECT id FROM reading_history
         WHERE book_id = ?1 AND chapter_number = ?2 AND timestamp LIKE ?3",
        &args![book_id, chapter, day_prefix],
    )?;

    if let Some(row) = existing {
        let id = HistoryId::from_string(row.text("id")?);
        store.run(
            "UPDATE reading_history SET timestamp = ?1 WHERE id = ?2",
            &args![timestamp, id.as_str()],
        )?;
        log::debug!("Updated history entry {} for {}:{}", id, book_id, chapter);
        return Ok(id);
    }

    let id = HistoryId::new();
    store.run(
        "INSERT INTO reading_history (id, book_id, chapter_number, timestamp) VALUES (?1, ?2, ?3, ?4)",
        &args![id.as_str(), book_id, chapter, timestamp],
    )?;
    log::debug!("Recorded history entry {} for {}:{}", id, book_id, chapter);
    Ok(id)
}

/// Most recent entries first.
pub fn recent(store: &dyn Store, limit: u32) -> Result<Vec<HistoryEntry>> {
    let rows = store.query_all(
        "SELECT * FROM reading_history ORDER BY timestamp DESC LIMIT ?1",
        &args![limit],
    )?;
    decode_all(rows)
}

/// Distinct books in history, most recently read first.
pub fn unique_books(store: &dyn Store) -> Result<Vec<u32>> {
    let rows = store.query_all(
        "SELECT book_id, MAX(timestamp) AS last_read FROM reading_history
         GROUP BY book_id ORDER BY last_read DESC",
        &[],
    )?;
    rows.iter().map(|row| row.u32("book_id")).collect()
}

/// Returns how many entries were deleted.
pub fn clear(store: &dyn Store) -> Result<u64> {
    let result = store.run("DELETE FROM reading_history", &[])?;
    log::info!("Reading history cleared ({} entries)", result.changes);
    Ok(result.changes)
}

/// Consecutive reading days ending at the most recent day with history.
pub fn streak(store: &dyn Store) -> Result<u32> {
    let rows = store.query_all(
        "SELECT DISTINCT substr(timestamp, 1, 10) AS day FROM reading_history ORDER BY day DESC",
        &[],
    )?;
    let days = rows
        .iter()
        .map(|row| {
            let day = row.text("day")?;
            NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|_| Error::decode("day", "date"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(consecutive_days(&days))
}

/// Length of the run at the head of `days`, which must be sorted
/// descending without duplicates.
fn consecutive_days(days: &[NaiveDate]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let run = days
        .windows(2)
        .take_while(|pair| (pair[0] - pair[1]).num_days() == 1)
        .count();
    u32::try_from(run + 1).unwrap_or(u32::MAX)
}

pub fn stats(store: &dyn Store) -> Result<HistoryStats> {
    let chapters_read = count(store, "SELECT COUNT(*) AS count FROM reading_history", &[])?;
    let unique_books = count(
        store,
        "SELECT COUNT(DISTINCT book_id) AS count FROM reading_history",
        &[],
    )?;
    let last_read = match store.query_first(
        "SELECT timestamp FROM reading_history ORDER BY timestamp DESC LIMIT 1",
        &[],
    )? {
        Some(row) => Some(row.timestamp("timestamp")?),
        None => None,
    };

    Ok(HistoryStats {
        chapters_read,
        unique_books,
        streak: streak(store)?,
        last_read,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_same_day_visit_collapses() {
        let db = Database::open_in_memory().unwrap();
        let first = record_at(&db, 1, 1, at(1, 8)).unwrap();
        let second = record_at(&db, 1, 1, at(1, 20)).unwrap();
        assert_eq!(first, second);

        let entries = recent(&db, 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, at(1, 20));
    }

    #[test]
    fn test_next_day_visit_adds_row() {
        let db = Database::open_in_memory().unwrap();
        record_at(&db, 1, 1, at(1, 8)).unwrap();
        record_at(&db, 1, 1, at(2, 8)).unwrap();
        assert_eq!(recent(&db, 10).unwrap().len(), 2);
        assert_eq!(recent(&db, 1).unwrap()[0].timestamp, at(2, 8));
    }

    #[test]
    fn test_unique_books_by_recency() {
        let db = Database::open_in_memory().unwrap();
        record_at(&db, 1, 1, at(1, 8)).unwrap();
        record_at(&db, 43, 3, at(2, 8)).unwrap();
        record_at(&db, 1, 2, at(3, 8)).unwrap();
        assert_eq!(unique_books(&db).unwrap(), vec![1, 43]);
    }

    #[test]
    fn test_streak() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(streak(&db).unwrap(), 0);

        record_at(&db, 1, 1, at(1, 8)).unwrap();
        record_at(&db, 1, 2, at(3, 8)).unwrap();
        record_at(&db, 1, 3, at(4, 8)).unwrap();
        record_at(&db, 1, 4, at(5, 23)).unwrap();
        assert_eq!(streak(&db).unwrap(), 3);
    }

    #[test]
    fn test_streak_rejects_unparseable_day() {
        let db = Database::open_in_memory().unwrap();
        record_at(&db, 1, 1, at(1, 8)).unwrap();
        db.run(
            "INSERT INTO reading_history (id, book_id, chapter_number, timestamp) VALUES (?1, ?2, ?3, ?4)",
            &crate::args!["h-bad", 1_u32, 2_u32, "yesterday"],
        )
        .unwrap();
        let err = streak(&db).unwrap_err();
        assert!(matches!(err, Error::Decode { ref column, expected: "date" } if column == "day"));
    }

    #[test]
    fn test_consecutive_days() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(consecutive_days(&[]), 0);
        assert_eq!(consecutive_days(&[d]), 1);
        assert_eq!(consecutive_days(&[d, d - Duration::days(1), d - Duration::days(3)]), 2);
    }

    #[test]
    fn test_stats_and_clear() {
        let db = Database::open_in_memory().unwrap();
        record_at(&db, 1, 1, at(1, 8)).unwrap();
        record_at(&db, 2, 1, at(2, 9)).unwrap();

        let s = stats(&db).unwrap();
        assert_eq!(s.chapters_read, 2);
        assert_eq!(s.unique_books, 2);
        assert_eq!(s.streak, 2);
        assert_eq!(s.last_read, Some(at(2, 9)));

        assert_eq!(clear(&db).unwrap(), 2);
        assert_eq!(stats(&db).unwrap().last_read, None);
    }
}
