//! Error types for corpus loading and remote fetching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a bundled corpus.
///
/// Unknown book codes are not errors: loaders skip them with a warning and
/// list them in [`LoadReport::skipped`](crate::loader::LoadReport::skipped).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The corpus file could not be read.
    #[error("corpus file missing: {}", path.display())]
    CorpusMissing {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The corpus file is not valid JSON of the expected shape.
    #[error("corpus file malformed: {}: {source}", path.display())]
    CorpusMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A book entry has no chapters.
    #[error("book {code} has no chapters")]
    EmptyBook { code: String },

    /// A chapter array has no verses.
    #[error("book {code} chapter {chapter} has no verses")]
    EmptyChapter { code: String, chapter: u32 },

    /// An error propagated from the storage layer.
    #[error("store error: {0}")]
    Store(#[from] biblia_core::Error),
}

impl LoadError {
    /// Returns `true` when the corpus file itself is absent, which callers
    /// usually treat as "feature unavailable" rather than a failure.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::CorpusMissing { .. })
    }
}

/// Errors that can occur while fetching a chapter from the remote text API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The book id has no remote name; no request was made.
    #[error("book {0} has no remote mapping")]
    UnmappedBook(u32),

    /// The remote API answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be parsed as a chapter.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// An error propagated from the storage layer.
    #[error("store error: {0}")]
    Store(#[from] biblia_core::Error),
}

impl FetchError {
    /// Returns `true` when the error is transient and the caller may
    /// succeed by retrying. Nothing in this crate retries on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Convenience alias for load results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Convenience alias for fetch results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
