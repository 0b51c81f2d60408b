use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{FromRow, Row};

/// A pre-processed study document (imported PDF text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    /// Opaque id derived from the source file name.
    pub id: String,
    pub title: String,
    pub content: String,
    pub page_count: u32,
    /// Free-form metadata carried over from the import step.
    pub info: serde_json::Value,
    pub added_at: Option<DateTime<Utc>>,
}

/// Listing projection of a material, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub id: String,
    pub title: String,
    pub page_count: u32,
    pub added_at: Option<DateTime<Utc>>,
}

impl FromRow for StudyMaterial {
    fn from_row(row: &Row) -> Result<Self> {
        let info = match row.opt_text("info")? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => serde_json::Value::Null,
        };
        Ok(Self {
            id: row.text("id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            page_count: row.u32("page_count")?,
            info,
            added_at: row.opt_timestamp("added_at")?,
        })
    }
}

impl FromRow for MaterialSummary {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.text("id")?,
            title: row.text("title")?,
            page_count: row.u32("page_count")?,
            added_at: row.opt_timestamp("added_at")?,
        })
    }
}

/// Reference row for a Talmud tractate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tractate {
    pub id: u32,
    pub name: String,
    pub name_hebrew: String,
    pub seder: String,
    pub pages: u32,
}

impl FromRow for Tractate {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.u32("id")?,
            name: row.text("name")?,
            name_hebrew: row.text("name_hebrew")?,
            seder: row.text("seder")?,
            pages: row.u32("pages")?,
        })
    }
}
