use anyhow::{Context, Result};

use biblia_core::schema::Store;
use biblia_etl::remote::BookDownload;
use biblia_etl::{Config, RemoteFetcher};

use super::{open_store, resolve_book};

/// Download one chapter, or a whole book chapter by chapter.
pub async fn run_fetch(config: &Config, book: &str, chapter: Option<u32>) -> Result<()> {
    let book = resolve_book(book)?;
    let fetcher = RemoteFetcher::from_config(config).context("Failed to create HTTP client")?;
    let mut db = open_store(config)?;

    match chapter {
        Some(chapter) => {
            let written = fetcher.download_chapter(&db, book.id, chapter).await?;
            println!("✓ {} {}: {} verses", book.name, chapter, written);
        }
        None => {
            println!("Downloading {} ({} chapters)", book.name, book.chapters);
            let mut progress = |chapter: u32, total: u32| println!("  ⏳ {chapter}/{total}");
            match fetcher.download_book(&db, book.id, Some(&mut progress)).await? {
                BookDownload::Complete { chapters } => println!("✓ {} complete ({chapters} chapters)", book.name),
                BookDownload::Failed {
                    chapter,
                    downloaded,
                    error,
                } => {
                    eprintln!("✗ Stopped at chapter {chapter} after {downloaded} chapters: {error}");
                    eprintln!("  Run `biblia fetch {} {chapter}` to retry it", book.corpus_code);
                }
            }
        }
    }

    let status = fetcher.download_status(&db, book.id)?;
    println!(
        "  {}/{} chapters cached ({}%)",
        status.downloaded, status.total, status.percentage
    );
    db.close()?;
    Ok(())
}
