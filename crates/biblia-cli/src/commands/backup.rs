use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use biblia_core::backup;
use biblia_core::schema::Store;
use biblia_etl::Config;

use super::open_store;

pub fn export(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(backup::file_name(Local::now().date_naive())));
    let mut db = open_store(config)?;
    let counts = backup::export_to(&db, &path)
        .with_context(|| format!("Failed to write backup {}", path.display()))?;
    println!("✓ Exported to {}", path.display());
    println!(
        "  {} bookmarks, {} highlights, {} history entries",
        counts.bookmarks, counts.highlights, counts.history
    );
    db.close()?;
    Ok(())
}

pub fn import(config: &Config, path: &Path) -> Result<()> {
    let mut db = open_store(config)?;
    let counts = backup::import_from(&db, path)
        .with_context(|| format!("Failed to import backup {}", path.display()))?;
    println!("✓ Imported {}", path.display());
    println!(
        "  {} bookmarks, {} highlights, {} history entries",
        counts.bookmarks, counts.highlights, counts.history
    );
    db.close()?;
    Ok(())
}

pub fn stats(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    let counts = backup::stats(&db)?;
    println!("Bookmarks: {}", counts.bookmarks);
    println!("Highlights: {}", counts.highlights);
    println!("History entries: {}", counts.history);
    db.close()?;
    Ok(())
}
