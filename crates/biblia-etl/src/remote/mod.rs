//! Remote fallback: fetch missing chapters from the public text API and
//! cache them locally.
//!
//! This is the only async part of the crate. The store stays synchronous,
//! so every write happens on the calling task between requests.

mod client;
mod resilience;

pub use client::{parse_chapter, BibleApiClient, RemoteVerse, DEFAULT_BASE_URL, DEFAULT_TRANSLATION};
pub use resilience::RateLimiter;

use serde::Serialize;

use biblia_core::args;
use biblia_core::canon;
use biblia_core::content;
use biblia_core::model::Verse;
use biblia_core::schema::Store;

use crate::batch::{BatchWriter, DEFAULT_BATCH_SIZE, VERSES};
use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Outcome of a whole-book download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookDownload {
    Complete { chapters: u32 },
    /// Stopped at `chapter`; chapters before it were stored.
    Failed {
        chapter: u32,
        downloaded: u32,
        error: String,
    },
}

/// How much of a book is cached locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadStatus {
    pub downloaded: u32,
    pub total: u32,
    /// Whole percent, rounded.
    pub percentage: u32,
}

/// Downloads chapters and writes them through the shared upsert path.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: BibleApiClient,
    rate_limiter: RateLimiter,
    version: String,
}

impl RemoteFetcher {
    pub fn new(client: BibleApiClient, rate_limiter: RateLimiter, version: impl Into<String>) -> Self {
        Self {
            client,
            rate_limiter,
            version: version.into(),
        }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = BibleApiClient::with_endpoint(&config.remote_base_url, &config.remote_translation)?;
        Ok(Self::new(
            client,
            RateLimiter::from_millis(config.request_delay_ms),
            &config.version,
        ))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Download one chapter and upsert its verses. Returns the verse count.
    ///
    /// Books without a remote name fail with [`FetchError::UnmappedBook`]
    /// before any request is made.
    pub async fn download_chapter(&self, store: &dyn Store, book_id: u32, chapter: u32) -> FetchResult<u64> {
        let name = canon::remote_name(book_id).ok_or(FetchError::UnmappedBook(book_id))?;

        self.rate_limiter.acquire().await;
        log::info!("Downloading {name} {chapter}");
        let verses = match self.client.fetch_chapter(name, chapter).await {
            Ok(verses) => verses,
            Err(e) => {
                log::error!("Failed to download {name} {chapter}: {e}");
                return Err(e);
            }
        };

        let written = self.store_chapter(store, book_id, chapter, &verses)?;
        log::debug!("Stored {written} verses from {name} {chapter}");
        Ok(written)
    }

    /// Upsert fetched verses, trimming their text, in one transaction.
    pub fn store_chapter(
        &self,
        store: &dyn Store,
        book_id: u32,
        chapter: u32,
        verses: &[RemoteVerse],
    ) -> FetchResult<u64> {
        let mut written = 0;
        store.transaction(&mut |tx| {
            let mut writer = BatchWriter::new(tx, &VERSES, DEFAULT_BATCH_SIZE);
            for verse in verses {
                writer.push(args![book_id, chapter, verse.verse, verse.text.trim(), &self.version])?;
            }
            written = writer.finish()?;
            Ok(())
        })?;
        Ok(written)
    }

    /// Download every chapter of a book in order, stopping at the first
    /// failure. `progress` receives `(chapter, total)` after each chapter.
    pub async fn download_book(
        &self,
        store: &dyn Store,
        book_id: u32,
        mut progress: Option<&mut (dyn FnMut(u32, u32) + '_)>,
    ) -> FetchResult<BookDownload> {
        let book = canon::by_id(book_id)
            .filter(|b| b.remote_name.is_some())
            .ok_or(FetchError::UnmappedBook(book_id))?;

        let mut downloaded = 0;
        for chapter in 1..=book.chapters {
            if let Err(e) = self.download_chapter(store, book_id, chapter).await {
                log::error!("Stopped {} at chapter {chapter}: {e}", book.name);
                return Ok(BookDownload::Failed {
                    chapter,
                    downloaded,
                    error: e.to_string(),
                });
            }
            downloaded += 1;
            if let Some(callback) = progress.as_mut() {
                callback(chapter, book.chapters);
            }
        }

        log::info!("Downloaded {} ({} chapters)", book.name, book.chapters);
        Ok(BookDownload::Complete {
            chapters: book.chapters,
        })
    }

    /// Read a chapter locally, downloading it only when nothing is cached.
    pub async fn chapter_or_fetch(&self, store: &dyn Store, book_id: u32, chapter: u32) -> FetchResult<Vec<Verse>> {
        let local = content::chapter_verses(store, book_id, chapter, &self.version)?;
        if !local.is_empty() {
            return Ok(local);
        }
        self.download_chapter(store, book_id, chapter).await?;
        Ok(content::chapter_verses(store, book_id, chapter, &self.version)?)
    }

    /// Count the chapters of a book already cached for this version.
    pub fn download_status(&self, store: &dyn Store, book_id: u32) -> FetchResult<DownloadStatus> {
        let book = canon::by_id(book_id).ok_or(FetchError::UnmappedBook(book_id))?;
        let mut downloaded = 0;
        for chapter in 1..=book.chapters {
            if content::is_chapter_downloaded(store, book_id, chapter, &self.version)? {
                downloaded += 1;
            }
        }
        Ok(DownloadStatus {
            downloaded,
            total: book.chapters,
            percentage: rounded_percent(downloaded, book.chapters),
        })
    }
}

fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part * 200 + whole) / (whole * 2)
}
