//! HTTP client for the public Bible text API.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{FetchError, FetchResult};

/// Public Bible text API.
pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";
/// Translation requested from the API.
pub const DEFAULT_TRANSLATION: &str = "almeida";

/// One verse of a fetched chapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteVerse {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct ChapterBody {
    verses: Option<Vec<RemoteVerse>>,
}

/// Client for `GET {base}/{book}+{chapter}?translation={translation}`.
#[derive(Debug, Clone)]
pub struct BibleApiClient {
    http: Client,
    base_url: String,
    translation: String,
}

impl BibleApiClient {
    /// Create a client against the default endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_endpoint(DEFAULT_BASE_URL, DEFAULT_TRANSLATION)
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("biblia/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            translation: translation.into(),
        })
    }

    #[must_use]
    pub fn chapter_url(&self, remote_name: &str, chapter: u32) -> String {
        format!(
            "{}/{}+{}?translation={}",
            self.base_url, remote_name, chapter, self.translation
        )
    }

    /// Fetch one chapter by the book's remote name.
    ///
    /// # Errors
    /// Returns [`FetchError::Http`] on a non-2xx status, [`FetchError::Request`]
    /// on transport failure, and [`FetchError::Parse`] when the body has no
    /// verse array.
    pub async fn fetch_chapter(&self, remote_name: &str, chapter: u32) -> FetchResult<Vec<RemoteVerse>> {
        let url = self.chapter_url(remote_name, chapter);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        parse_chapter(&body)
    }
}

/// Parse a chapter response body into its verses.
///
/// # Errors
/// Returns [`FetchError::Parse`] when the body is not JSON or has no
/// `verses` array.
pub fn parse_chapter(body: &str) -> FetchResult<Vec<RemoteVerse>> {
    let parsed: ChapterBody = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        message: e.to_string(),
    })?;
    parsed.verses.ok_or_else(|| FetchError::Parse {
        message: "response has no verses array".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(BibleApiClient::new().is_ok());
    }

    #[test]
    fn test_chapter_url() {
        let client = BibleApiClient::new().unwrap();
        assert_eq!(
            client.chapter_url("john", 3),
            "https://bible-api.com/john+3?translation=almeida"
        );
        let custom = BibleApiClient::with_endpoint("http://localhost:8080/", "kjv").unwrap();
        assert_eq!(
            custom.chapter_url("song+of+solomon", 2),
            "http://localhost:8080/song+of+solomon+2?translation=kjv"
        );
    }

    #[test]
    fn test_parse_chapter() {
        let body = r#"{
            "reference": "John 3",
            "verses": [
                {"book_id": "JHN", "book_name": "John", "chapter": 3, "verse": 1, "text": " Havia um homem\n"},
                {"book_id": "JHN", "book_name": "John", "chapter": 3, "verse": 2, "text": "Este foi ter"}
            ],
            "translation_id": "almeida"
        }"#;
        let verses = parse_chapter(body).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].verse, 1);
        assert_eq!(verses[0].text, " Havia um homem\n");
    }

    #[test]
    fn test_parse_without_verses() {
        let err = parse_chapter(r#"{"error": "not found"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
        let err = parse_chapter("<html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }
}
