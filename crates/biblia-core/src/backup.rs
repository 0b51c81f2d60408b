//! JSON export and import of user data.
//!
//! Records are carried as stored, with column names as field names, so a
//! document written by any earlier release imports without translation.
//! Ids that are not UUIDs are kept verbatim.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::{count, decode_all, FromRow, Row, Store};
use crate::user::settings::{self, UserSettings};
use crate::args;

/// Format version written into new documents.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: String,
    pub book_id: u32,
    pub chapter_number: u32,
    pub verse_number: u32,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub id: String,
    pub book_id: u32,
    pub chapter_number: u32,
    pub verse_number: u32,
    pub color: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub book_id: u32,
    pub chapter_number: u32,
    #[serde(alias = "read_at")]
    pub timestamp: String,
}

/// The whole backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub bookmarks: Vec<BookmarkRecord>,
    #[serde(default)]
    pub highlights: Vec<HighlightRecord>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
    #[serde(default)]
    pub settings: UserSettings,
}

/// Rows restored by an import, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackupCounts {
    pub bookmarks: u64,
    pub highlights: u64,
    pub history: u64,
}

impl FromRow for BookmarkRecord {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.text("id")?,
            book_id: row.u32("book_id")?,
            chapter_number: row.u32("chapter_number")?,
            verse_number: row.u32("verse_number")?,
            note: row.opt_text("note")?,
            created_at: row.text("created_at")?,
        })
    }
}

impl FromRow for HighlightRecord {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.text("id")?,
            book_id: row.u32("book_id")?,
            chapter_number: row.u32("chapter_number")?,
            verse_number: row.u32("verse_number")?,
            color: row.text("color")?,
            created_at: row.text("created_at")?,
        })
    }
}

impl FromRow for HistoryRecord {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.text("id")?,
            book_id: row.u32("book_id")?,
            chapter_number: row.u32("chapter_number")?,
            timestamp: row.text("timestamp")?,
        })
    }
}

/// Default file name for a backup taken on `date`.
#[must_use]
pub fn file_name(date: NaiveDate) -> String {
    format!("biblia_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Snapshot all user data.
pub fn export(store: &dyn Store) -> Result<BackupDocument> {
    Ok(BackupDocument {
        version: BACKUP_FORMAT_VERSION.to_string(),
        export_date: Utc::now().to_rfc3339(),
        bookmarks: decode_all(store.query_all("SELECT * FROM bookmarks", &[])?)?,
        highlights: decode_all(store.query_all("SELECT * FROM verse_highlights", &[])?)?,
        history: decode_all(store.query_all("SELECT * FROM reading_history", &[])?)?,
        settings: settings::get(store)?,
    })
}

/// Write a pretty-printed backup to `path`.
pub fn export_to(store: &dyn Store, path: &Path) -> Result<BackupCounts> {
    let document = export(store)?;
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(path, json)?;
    log::info!("Backup exported to {}", path.display());
    Ok(document.counts())
}

/// Restore a document. Records replace rows with the same id; a highlight
/// also replaces any other highlight on its verse. Nothing is deleted.
pub fn import(store: &dyn Store, document: &BackupDocument) -> Result<BackupCounts> {
    document.validate()?;
    store.transaction(&mut |tx| {
        for b in &document.bookmarks {
            tx.run(
                "INSERT OR REPLACE INTO bookmarks (id, book_id, chapter_number, verse_number, note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &args![&b.id, b.book_id, b.chapter_number, b.verse_number, b.note.as_deref(), &b.created_at],
            )?;
        }
        for h in &document.highlights {
            tx.run(
                "INSERT OR REPLACE INTO verse_highlights (id, book_id, chapter_number, verse_number, color, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &args![&h.id, h.book_id, h.chapter_number, h.verse_number, &h.color, &h.created_at],
            )?;
        }
        for e in &document.history {
            tx.run(
                "INSERT OR REPLACE INTO reading_history (id, book_id, chapter_number, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                &args![&e.id, e.book_id, e.chapter_number, &e.timestamp],
            )?;
        }
        settings::apply(tx, &document.settings)
    })?;

    let counts = document.counts();
    log::info!(
        "Backup imported: {} bookmarks, {} highlights, {} history entries",
        counts.bookmarks,
        counts.highlights,
        counts.history
    );
    Ok(counts)
}

/// Read and restore the document at `path`.
pub fn import_from(store: &dyn Store, path: &Path) -> Result<BackupCounts> {
    let raw = fs::read_to_string(path)?;
    let document: BackupDocument = serde_json::from_str(&raw)?;
    import(store, &document)
}

/// Current row counts of the tables a backup covers.
pub fn stats(store: &dyn Store) -> Result<BackupCounts> {
    Ok(BackupCounts {
        bookmarks: count(store, "SELECT COUNT(*) AS count FROM bookmarks", &[])?,
        highlights: count(store, "SELECT COUNT(*) AS count FROM verse_highlights", &[])?,
        history: count(store, "SELECT COUNT(*) AS count FROM reading_history", &[])?,
    })
}

impl BackupDocument {
    fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() || self.export_date.trim().is_empty() {
            return Err(Error::InvalidData(
                "backup document is missing version or exportDate".to_string(),
            ));
        }
        Ok(())
    }

    fn counts(&self) -> BackupCounts {
        BackupCounts {
            bookmarks: self.bookmarks.len() as u64,
            highlights: self.highlights.len() as u64,
            history: self.history.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HighlightColor, VerseRef};
    use crate::schema::Database;
    use crate::user::{bookmarks, highlights, history};
    use tempfile::TempDir;

    #[test]
    fn test_export_import_between_databases() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.json");

        let source = Database::open_in_memory().unwrap();
        bookmarks::add(&source, VerseRef::new(43, 3, 16), Some("amor")).unwrap();
        highlights::set(&source, VerseRef::new(19, 23, 1), HighlightColor::Green).unwrap();
        history::record(&source, 1, 1).unwrap();
        settings::apply(
            &source,
            &UserSettings {
                theme: Some("dark".to_string()),
                ..UserSettings::default()
            },
        )
        .unwrap();

        let exported = export_to(&source, &path).unwrap();
        assert_eq!(exported, stats(&source).unwrap());

        let target = Database::open_in_memory().unwrap();
        let imported = import_from(&target, &path).unwrap();
        assert_eq!(imported.bookmarks, 1);
        assert_eq!(stats(&target).unwrap(), stats(&source).unwrap());
        assert_eq!(settings::get(&target).unwrap().theme.as_deref(), Some("dark"));

        // Importing the same file again replaces rather than duplicates.
        import_from(&target, &path).unwrap();
        assert_eq!(stats(&target).unwrap(), stats(&source).unwrap());
    }

    #[test]
    fn test_document_field_names() {
        let db = Database::open_in_memory().unwrap();
        let json = serde_json::to_value(export(&db).unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert!(json["exportDate"].is_string());
        assert!(json["bookmarks"].is_array());
        assert!(json["settings"].is_object());
    }

    #[test]
    fn test_legacy_document_imports() {
        let db = Database::open_in_memory().unwrap();
        let raw = r#"{
            "version": "1.0",
            "exportDate": "2024-01-05T10:00:00.000Z",
            "bookmarks": [{"id": "bookmark_1704448800000_k2j4h1l0p", "book_id": 1,
                           "chapter_number": 1, "verse_number": 1, "note": null,
                           "created_at": "2024-01-05T09:00:00.000Z"}],
            "highlights": [],
            "history": [{"id": "history_1", "book_id": 1, "chapter_number": 2,
                         "read_at": "2024-01-05T09:30:00.000Z"}],
            "settings": {}
        }"#;
        let document: BackupDocument = serde_json::from_str(raw).unwrap();
        let counts = import(&db, &document).unwrap();
        assert_eq!(counts.history, 1);
        assert_eq!(bookmarks::list(&db).unwrap()[0].id.as_str(), "bookmark_1704448800000_k2j4h1l0p");
        assert_eq!(settings::get(&db).unwrap().preferred_version.as_deref(), Some("acf"));
    }

    #[test]
    fn test_invalid_document_rejected() {
        let db = Database::open_in_memory().unwrap();
        let document: BackupDocument = serde_json::from_str(r#"{"bookmarks": []}"#).unwrap();
        assert!(matches!(import(&db, &document), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(file_name(date), "biblia_backup_2024-03-01.json");
    }
}
