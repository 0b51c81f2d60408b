use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// A multi-day reading plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPlan {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: u32,
}

impl FromRow for ReadingPlan {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.u32("id")?,
            name: row.text("name")?,
            description: row.opt_text("description")?,
            duration_days: row.u32("duration_days")?,
        })
    }
}

/// One assignment within a plan day: a contiguous chapter range of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub book_id: u32,
    pub chapter_start: u32,
    pub chapter_end: u32,
}

impl Reading {
    #[must_use]
    pub const fn chapter_count(&self) -> u32 {
        self.chapter_end.saturating_sub(self.chapter_start) + 1
    }
}

/// A single day of a plan. `readings` is stored as a JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub plan_id: u32,
    pub day: u32,
    pub readings: Vec<Reading>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl FromRow for PlanDay {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            plan_id: row.u32("plan_id")?,
            day: row.u32("day_number")?,
            readings: serde_json::from_str(&row.text("readings")?)?,
            completed: row.flag("completed")?,
            completed_at: row.opt_timestamp("completed_at")?,
        })
    }
}

/// A user's position within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReadingProgress {
    pub plan_id: u32,
    pub current_day: u32,
    pub started_at: DateTime<Utc>,
    pub last_read_at: Option<DateTime<Utc>>,
}

impl FromRow for UserReadingProgress {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            plan_id: row.u32("plan_id")?,
            current_day: row.u32("current_day")?,
            started_at: row.timestamp("started_at")?,
            last_read_at: row.opt_timestamp("last_read_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_chapter_count() {
        let r = Reading {
            book_id: 1,
            chapter_start: 3,
            chapter_end: 5,
        };
        assert_eq!(r.chapter_count(), 3);
    }

    #[test]
    fn test_readings_blob_format() {
        let json = r#"[{"book_id": 1, "chapter_start": 1, "chapter_end": 3}]"#;
        let readings: Vec<Reading> = serde_json::from_str(json).unwrap();
        assert_eq!(readings[0].chapter_end, 3);
    }
}
