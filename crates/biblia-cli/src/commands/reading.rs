use anyhow::Result;

use biblia_core::canon;
use biblia_core::schema::Store;
use biblia_core::user::{history, plans, progress as reading_progress};
use biblia_etl::Config;

use super::{open_store, resolve_book};

pub fn history_recent(config: &Config, limit: u32) -> Result<()> {
    let mut db = open_store(config)?;
    for entry in history::recent(&db, limit)? {
        let name = canon::by_id(entry.book_id).map_or("?", |b| b.name);
        println!("{}  {} {}", entry.timestamp.format("%Y-%m-%d %H:%M"), name, entry.chapter);
    }
    db.close()?;
    Ok(())
}

pub fn history_stats(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    let stats = history::stats(&db)?;
    println!("Chapters read: {}", stats.chapters_read);
    println!("Books visited: {}", stats.unique_books);
    println!("Streak: {} day(s)", stats.streak);
    if let Some(last) = stats.last_read {
        println!("Last read: {}", last.format("%Y-%m-%d %H:%M"));
    }
    db.close()?;
    Ok(())
}

pub fn history_clear(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    let removed = history::clear(&db)?;
    println!("✓ Cleared {removed} history entries");
    db.close()?;
    Ok(())
}

pub fn plan_list(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    for plan in plans::list(&db)? {
        let state = match plans::progress(&db, plan.id)? {
            Some(progress) => format!("day {}", progress.current_day),
            None => "not started".to_string(),
        };
        println!("{:>3}  {} ({} days, {state})", plan.id, plan.name, plan.duration_days);
    }
    db.close()?;
    Ok(())
}

pub fn plan_start(config: &Config, plan: u32) -> Result<()> {
    let mut db = open_store(config)?;
    let progress = plans::start(&db, plan)?;
    println!("✓ Plan {plan} on day {}", progress.current_day);
    db.close()?;
    Ok(())
}

pub fn plan_day(config: &Config, plan: u32, day: u32) -> Result<()> {
    let mut db = open_store(config)?;
    match plans::day(&db, plan, day)? {
        Some(plan_day) => {
            let done = if plan_day.completed { " ✓" } else { "" };
            println!("Day {}{done}", plan_day.day);
            for reading in &plan_day.readings {
                let name = canon::by_id(reading.book_id).map_or("?", |b| b.name);
                if reading.chapter_start == reading.chapter_end {
                    println!("  {} {}", name, reading.chapter_start);
                } else {
                    println!("  {} {}-{}", name, reading.chapter_start, reading.chapter_end);
                }
            }
        }
        None => println!("Plan {plan} has no day {day}."),
    }
    db.close()?;
    Ok(())
}

pub fn plan_complete(config: &Config, plan: u32, day: u32) -> Result<()> {
    let mut db = open_store(config)?;
    plans::mark_completed(&db, plan, day)?;
    println!("✓ Day {day} completed");
    db.close()?;
    Ok(())
}

pub fn plan_stats(config: &Config, plan: u32) -> Result<()> {
    let mut db = open_store(config)?;
    let stats = plans::completion_stats(&db, plan)?;
    println!(
        "{}/{} days completed ({}%)",
        stats.completed_days, stats.total_days, stats.percentage
    );
    db.close()?;
    Ok(())
}

pub fn progress(config: &Config, book: Option<&str>) -> Result<()> {
    let mut db = open_store(config)?;
    match book {
        Some(raw) => {
            let book = resolve_book(raw)?;
            match reading_progress::book(&db, book.id)? {
                Some(p) => println!(
                    "{}: {}/{} chapters ({:.2}%){}",
                    book.name,
                    p.chapters_read,
                    p.total_chapters,
                    p.percentage,
                    if p.is_completed { " ✓" } else { "" }
                ),
                None => println!("{} is not tracked.", book.name),
            }
        }
        None => {
            let stats = reading_progress::detailed(&db)?;
            println!(
                "Canon: {}/{} chapters ({:.2}%), {} books completed",
                stats.overall.chapters_read,
                stats.overall.total_chapters,
                stats.overall.percentage,
                stats.overall.books_completed
            );
            println!("Old Testament: {:.2}%", stats.ot_percentage);
            println!("New Testament: {:.2}%", stats.nt_percentage);
            println!("Streak: {} day(s)", stats.history.streak);
        }
    }
    db.close()?;
    Ok(())
}
