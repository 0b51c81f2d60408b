use anyhow::{Context, Result};

use biblia_core::content::{self, hymns, materials, quran};
use biblia_core::model::{Testament, VerseRef};
use biblia_core::schema::Store;
use biblia_core::user::{highlights, history};
use biblia_etl::{Config, RemoteFetcher};

use super::{label, open_store, resolve_book};

pub fn list_books(config: &Config, testament: Option<&str>) -> Result<()> {
    let testament = testament.map(str::parse::<Testament>).transpose()?;
    let mut db = open_store(config)?;
    for book in content::books(&db, testament)? {
        println!("{:>3}  {:<6} {:<20} {:>3} chapters", book.id, book.abbreviation, book.name, book.chapters);
    }
    db.close()?;
    Ok(())
}

/// Print a chapter, recording the visit in the reading history.
pub async fn read_chapter(config: &Config, book: &str, chapter: u32, fetch: bool) -> Result<()> {
    let book = resolve_book(book)?;
    let mut db = open_store(config)?;

    let verses = if fetch {
        let fetcher = RemoteFetcher::from_config(config).context("Failed to create HTTP client")?;
        fetcher.chapter_or_fetch(&db, book.id, chapter).await?
    } else {
        content::chapter_verses(&db, book.id, chapter, &config.version)?
    };

    if verses.is_empty() {
        println!("{} {} is not available offline.", book.name, chapter);
        if book.remote_name.is_some() {
            println!("Run with --fetch to download it.");
        }
    } else {
        println!("\n{} {}\n", book.name, chapter);
        let marked = highlights::for_chapter(&db, book.id, chapter)?;
        for verse in &verses {
            let color = marked
                .iter()
                .find(|h| h.verse.verse == verse.verse)
                .map(|h| format!(" [{}]", h.color))
                .unwrap_or_default();
            println!("{:>4} {}{}", verse.verse, verse.text, color);
        }
        history::record(&db, book.id, chapter)?;
    }
    db.close()?;
    Ok(())
}

pub fn search(config: &Config, query: &str) -> Result<()> {
    let mut db = open_store(config)?;
    let hits = content::search_verses(&db, query, &config.version)?;
    for verse in &hits {
        println!("{}  {}", label(VerseRef::new(verse.book_id, verse.chapter, verse.verse)), verse.text);
    }
    println!("\n{} results", hits.len());
    db.close()?;
    Ok(())
}

pub fn random(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    match content::random_verse(&db, &config.version)? {
        Some(verse) => println!(
            "{}\n{}",
            label(VerseRef::new(verse.book_id, verse.chapter, verse.verse)),
            verse.text
        ),
        None => println!("No verses cached for {}.", config.version),
    }
    db.close()?;
    Ok(())
}

pub fn quran(config: &Config, surah: u32) -> Result<()> {
    if !(1..=quran::SURAH_COUNT).contains(&surah) {
        anyhow::bail!("Surah must be between 1 and {}", quran::SURAH_COUNT);
    }
    let mut db = open_store(config)?;
    let verses = quran::surah(&db, surah)?;
    if verses.is_empty() {
        println!("Surah {surah} is not loaded.");
    }
    for verse in verses {
        println!("{:>4} {}\n     {}", verse.verse, verse.text_arabic, verse.text_translated);
    }
    db.close()?;
    Ok(())
}

pub fn hymn(config: &Config, number: u32) -> Result<()> {
    let mut db = open_store(config)?;
    match hymns::by_number(&db, number)? {
        Some(hymn) => {
            println!("{}. {}", hymn.number, hymn.title);
            if let Some(category) = &hymn.category {
                println!("({category})");
            }
            println!("\n{}", hymn.lyrics);
        }
        None => println!("Hymn {number} not found."),
    }
    db.close()?;
    Ok(())
}

pub fn hymn_search(config: &Config, query: &str) -> Result<()> {
    let mut db = open_store(config)?;
    for hymn in hymns::search(&db, query)? {
        println!("{:>4}  {}", hymn.number, hymn.title);
    }
    db.close()?;
    Ok(())
}

pub fn hymn_list(config: &Config, category: Option<&str>) -> Result<()> {
    let mut db = open_store(config)?;
    let list = match category {
        Some(category) => hymns::by_category(&db, category)?,
        None => hymns::all(&db)?,
    };
    for hymn in list {
        println!("{:>4}  {}", hymn.number, hymn.title);
    }
    db.close()?;
    Ok(())
}

pub fn materials_list(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    for material in materials::list(&db)? {
        println!("{:<30} {} ({} pages)", material.id, material.title, material.page_count);
    }
    db.close()?;
    Ok(())
}

pub fn materials_search(config: &Config, query: &str) -> Result<()> {
    let mut db = open_store(config)?;
    for material in materials::search(&db, query)? {
        println!("{:<30} {}", material.id, material.title);
    }
    db.close()?;
    Ok(())
}

pub fn material(config: &Config, id: &str) -> Result<()> {
    let mut db = open_store(config)?;
    match materials::material(&db, id)? {
        Some(material) => println!("{} ({} pages)\n\n{}", material.title, material.page_count, material.content),
        None => println!("Material {id} not found."),
    }
    db.close()?;
    Ok(())
}

pub fn tractates(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    for tractate in materials::tractates(&db)? {
        println!(
            "{:<12} {:<10} {:<8} {:>4} pages",
            tractate.name, tractate.name_hebrew, tractate.seder, tractate.pages
        );
    }
    db.close()?;
    Ok(())
}
