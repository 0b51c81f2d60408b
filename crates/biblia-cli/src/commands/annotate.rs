use anyhow::Result;

use biblia_core::model::{BookmarkId, HighlightColor};
use biblia_core::schema::Store;
use biblia_core::user::{bookmarks, highlights};
use biblia_etl::Config;

use super::{label, open_store, verse_ref};

pub fn bookmark_add(config: &Config, book: &str, chapter: u32, verse: u32, note: Option<&str>) -> Result<()> {
    let verse = verse_ref(book, chapter, verse)?;
    let mut db = open_store(config)?;
    let id = bookmarks::add(&db, verse, note)?;
    println!("✓ Bookmarked {} ({})", label(verse), id.as_str());
    db.close()?;
    Ok(())
}

pub fn bookmark_remove(config: &Config, book: &str, chapter: u32, verse: u32) -> Result<()> {
    let verse = verse_ref(book, chapter, verse)?;
    let mut db = open_store(config)?;
    let removed = bookmarks::remove_for_verse(&db, verse)?;
    println!("Removed {removed} bookmark(s) on {}", label(verse));
    db.close()?;
    Ok(())
}

pub fn bookmark_note(config: &Config, id: &str, note: &str) -> Result<()> {
    let mut db = open_store(config)?;
    if bookmarks::update_note(&db, &BookmarkId::from_string(id), note)? {
        println!("✓ Note updated");
    } else {
        println!("Bookmark {id} not found.");
    }
    db.close()?;
    Ok(())
}

pub fn bookmark_list(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    for bookmark in bookmarks::list(&db)? {
        println!(
            "{}  {:<24} {}",
            bookmark.created_at.format("%Y-%m-%d"),
            label(bookmark.verse),
            bookmark.note.as_deref().unwrap_or("")
        );
    }
    db.close()?;
    Ok(())
}

pub fn highlight_set(config: &Config, book: &str, chapter: u32, verse: u32, color: HighlightColor) -> Result<()> {
    let verse = verse_ref(book, chapter, verse)?;
    let mut db = open_store(config)?;
    highlights::set(&db, verse, color)?;
    println!("✓ Highlighted {} in {color}", label(verse));
    db.close()?;
    Ok(())
}

pub fn highlight_remove(config: &Config, book: &str, chapter: u32, verse: u32) -> Result<()> {
    let verse = verse_ref(book, chapter, verse)?;
    let mut db = open_store(config)?;
    if highlights::remove(&db, verse)? {
        println!("✓ Removed highlight on {}", label(verse));
    } else {
        println!("{} is not highlighted.", label(verse));
    }
    db.close()?;
    Ok(())
}

pub fn highlight_list(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    for highlight in highlights::list(&db)? {
        println!("{:<8} {}", highlight.color, label(highlight.verse));
    }
    db.close()?;
    Ok(())
}
