//! Reading plans and per-plan progress.

use serde::Serialize;

use crate::args;
use crate::error::{Error, Result};
use crate::model::{PlanDay, Reading, ReadingPlan, UserReadingProgress};
use crate::schema::{count, decode_all, decode_first, Store};

/// Id of the built-in chronological plan.
pub const CHRONOLOGICAL_PLAN_ID: u32 = 1;
const CHRONOLOGICAL_PLAN_NAME: &str = "Leitura Cronológica em 1 Ano";
const CHRONOLOGICAL_PLAN_DESCRIPTION: &str =
    "Leia a Bíblia em ordem cronológica dos acontecimentos em 365 dias";
const CHRONOLOGICAL_PLAN_DAYS: u32 = 365;

/// Opening schedule of the chronological plan as (day, book, first, last).
const CHRONOLOGICAL_OPENING: &[(u32, u32, u32, u32)] = &[
    (1, 1, 1, 2),
    (2, 1, 3, 5),
    (3, 1, 6, 9),
    (4, 1, 10, 11),
    (5, 1, 12, 15),
    (6, 1, 16, 18),
    (7, 1, 19, 21),
    (8, 18, 1, 5),
    (9, 18, 6, 10),
    (10, 18, 11, 14),
    (11, 18, 15, 19),
    (12, 18, 20, 24),
    (13, 18, 25, 31),
    (14, 18, 32, 36),
    (15, 18, 37, 42),
    (16, 1, 22, 24),
    (17, 1, 25, 26),
    (18, 1, 27, 29),
    (19, 1, 30, 31),
    (20, 1, 32, 34),
    (21, 1, 35, 37),
    (22, 1, 38, 40),
    (23, 1, 41, 42),
    (24, 1, 43, 45),
    (25, 1, 46, 47),
    (26, 1, 48, 50),
    (27, 2, 1, 3),
    (28, 2, 4, 6),
    (29, 2, 7, 9),
    (30, 2, 10, 12),
    (31, 2, 13, 15),
    (32, 2, 16, 18),
    (33, 2, 19, 21),
    (34, 2, 22, 24),
    (35, 2, 25, 27),
    (36, 2, 28, 29),
    (37, 2, 30, 32),
    (38, 2, 33, 35),
    (39, 2, 36, 38),
    (40, 2, 39, 40),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total_days: u64,
    pub completed_days: u64,
    /// Whole-number percentage.
    pub percentage: u32,
}

pub fn list(store: &dyn Store) -> Result<Vec<ReadingPlan>> {
    let rows = store.query_all("SELECT * FROM reading_plans ORDER BY id", &[])?;
    decode_all(rows)
}

pub fn progress(store: &dyn Store, plan_id: u32) -> Result<Option<UserReadingProgress>> {
    let row = store.query_first(
        "SELECT * FROM user_reading_progress WHERE plan_id = ?1",
        &args![plan_id],
    )?;
    decode_first(row)
}

/// Start a plan at day 1. Starting a plan already in progress keeps its
/// current position.
pub fn start(store: &dyn Store, plan_id: u32) -> Result<UserReadingProgress> {
    let plan = count(
        store,
        "SELECT COUNT(*) AS count FROM reading_plans WHERE id = ?1",
        &args![plan_id],
    )?;
    if plan == 0 {
        return Err(Error::NotFound {
            entity: "reading plan",
            id: plan_id.to_string(),
        });
    }

    store.run(
        "INSERT OR IGNORE INTO user_reading_progress (plan_id, current_day, started_at)
         VALUES (?1, 1, CURRENT_TIMESTAMP)",
        &args![plan_id],
    )?;
    progress(store, plan_id)?.ok_or_else(|| Error::NotFound {
        entity: "reading progress",
        id: plan_id.to_string(),
    })
}

pub fn day(store: &dyn Store, plan_id: u32, day: u32) -> Result<Option<PlanDay>> {
    let row = store.query_first(
        "SELECT * FROM reading_plan_days WHERE plan_id = ?1 AND day_number = ?2",
        &args![plan_id, day],
    )?;
    decode_first(row)
}

/// Mark `day` completed and advance the plan's current day past it.
pub fn mark_completed(store: &dyn Store, plan_id: u32, day: u32) -> Result<()> {
    store.transaction(&mut |tx| {
        let updated = tx.run(
            "UPDATE reading_plan_days SET completed = 1, completed_at = CURRENT_TIMESTAMP
             WHERE plan_id = ?1 AND day_number = ?2",
            &args![plan_id, day],
        )?;
        if updated.changes == 0 {
            return Err(Error::NotFound {
                entity: "reading plan day",
                id: format!("{plan_id}/{day}"),
            });
        }
        tx.run(
            "UPDATE user_reading_progress SET current_day = ?1, last_read_at = CURRENT_TIMESTAMP
             WHERE plan_id = ?2",
            &args![day + 1, plan_id],
        )?;
        Ok(())
    })
}

pub fn completion_stats(store: &dyn Store, plan_id: u32) -> Result<CompletionStats> {
    let total_days = count(
        store,
        "SELECT COUNT(*) AS count FROM reading_plan_days WHERE plan_id = ?1",
        &args![plan_id],
    )?;
    let completed_days = count(
        store,
        "SELECT COUNT(*) AS count FROM reading_plan_days WHERE plan_id = ?1 AND completed = 1",
        &args![plan_id],
    )?;
    let percentage = if total_days == 0 {
        0
    } else {
        ((completed_days as f64 / total_days as f64) * 100.0).round() as u32
    };
    Ok(CompletionStats {
        total_days,
        completed_days,
        percentage,
    })
}

/// Create the chronological plan with its opening schedule. Safe to call
/// on every start; an existing plan is left untouched.
pub fn initialize_chronological(store: &dyn Store) -> Result<bool> {
    let existing = count(
        store,
        "SELECT COUNT(*) AS count FROM reading_plans WHERE id = ?1",
        &args![CHRONOLOGICAL_PLAN_ID],
    )?;
    if existing > 0 {
        return Ok(false);
    }

    store.transaction(&mut |tx| {
        tx.run(
            "INSERT INTO reading_plans (id, name, description, duration_days) VALUES (?1, ?2, ?3, ?4)",
            &args![
                CHRONOLOGICAL_PLAN_ID,
                CHRONOLOGICAL_PLAN_NAME,
                CHRONOLOGICAL_PLAN_DESCRIPTION,
                CHRONOLOGICAL_PLAN_DAYS,
            ],
        )?;
        for &(day, book_id, chapter_start, chapter_end) in CHRONOLOGICAL_OPENING {
            let readings = serde_json::to_string(&[Reading {
                book_id,
                chapter_start,
                chapter_end,
            }])?;
            tx.run(
                "INSERT INTO reading_plan_days (plan_id, day_number, readings) VALUES (?1, ?2, ?3)",
                &args![CHRONOLOGICAL_PLAN_ID, day, readings],
            )?;
        }
        Ok(())
    })?;
    log::info!(
        "Chronological reading plan initialized with {} days",
        CHRONOLOGICAL_OPENING.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        initialize_chronological(&db).unwrap();
        db
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = setup();
        assert!(!initialize_chronological(&db).unwrap());
        let plans = list(&db).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].duration_days, 365);
    }

    #[test]
    fn test_day_readings() {
        let db = setup();
        let day8 = day(&db, CHRONOLOGICAL_PLAN_ID, 8).unwrap().unwrap();
        assert_eq!(
            day8.readings,
            vec![Reading {
                book_id: 18,
                chapter_start: 1,
                chapter_end: 5
            }]
        );
        assert!(!day8.completed);
        assert!(day(&db, CHRONOLOGICAL_PLAN_ID, 300).unwrap().is_none());
    }

    #[test]
    fn test_start_keeps_position() {
        let db = setup();
        assert!(progress(&db, CHRONOLOGICAL_PLAN_ID).unwrap().is_none());
        let started = start(&db, CHRONOLOGICAL_PLAN_ID).unwrap();
        assert_eq!(started.current_day, 1);

        mark_completed(&db, CHRONOLOGICAL_PLAN_ID, 1).unwrap();
        let again = start(&db, CHRONOLOGICAL_PLAN_ID).unwrap();
        assert_eq!(again.current_day, 2);
        assert!(again.last_read_at.is_some());
    }

    #[test]
    fn test_start_unknown_plan() {
        let db = setup();
        assert!(matches!(start(&db, 42), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_completion_stats() {
        let db = setup();
        start(&db, CHRONOLOGICAL_PLAN_ID).unwrap();
        for d in 1..=10 {
            mark_completed(&db, CHRONOLOGICAL_PLAN_ID, d).unwrap();
        }
        let stats = completion_stats(&db, CHRONOLOGICAL_PLAN_ID).unwrap();
        assert_eq!(stats.total_days, 40);
        assert_eq!(stats.completed_days, 10);
        assert_eq!(stats.percentage, 25);
        assert!(day(&db, CHRONOLOGICAL_PLAN_ID, 10).unwrap().unwrap().completed);
    }

    #[test]
    fn test_mark_unknown_day_rolls_back() {
        let db = setup();
        assert!(mark_completed(&db, CHRONOLOGICAL_PLAN_ID, 999).is_err());
        assert_eq!(completion_stats(&db, CHRONOLOGICAL_PLAN_ID).unwrap().completed_days, 0);
    }
}
