//! Study materials and Talmud tractate reference data.

use crate::args;
use crate::error::Result;
use crate::model::{MaterialSummary, StudyMaterial, Tractate};
use crate::schema::{count, decode_all, decode_first, Store};

use super::like_pattern;

/// Maximum rows returned by [`search`].
pub const SEARCH_LIMIT: u32 = 20;

/// Every material without its content, ordered by title.
pub fn list(store: &dyn Store) -> Result<Vec<MaterialSummary>> {
    let rows = store.query_all(
        "SELECT id, title, page_count, added_at FROM study_materials ORDER BY title",
        &[],
    )?;
    decode_all(rows)
}

/// Match `needle` against title or content, case-insensitively.
pub fn search(store: &dyn Store, needle: &str) -> Result<Vec<MaterialSummary>> {
    let rows = store.query_all(
        &format!(
            "SELECT id, title, page_count, added_at FROM study_materials
             WHERE LOWER(title) LIKE LOWER(?1) ESCAPE '\\'
                OR LOWER(content) LIKE LOWER(?1) ESCAPE '\\'
             ORDER BY title
             LIMIT {SEARCH_LIMIT}"
        ),
        &args![like_pattern(needle)],
    )?;
    decode_all(rows)
}

pub fn material(store: &dyn Store, id: &str) -> Result<Option<StudyMaterial>> {
    let row = store.query_first(
        "SELECT id, title, content, page_count, info, added_at FROM study_materials WHERE id = ?1",
        &args![id],
    )?;
    decode_first(row)
}

pub fn total(store: &dyn Store) -> Result<u64> {
    count(store, "SELECT COUNT(*) AS count FROM study_materials", &[])
}

pub fn tractates(store: &dyn Store) -> Result<Vec<Tractate>> {
    let rows = store.query_all(
        "SELECT id, name, name_hebrew, seder, pages FROM talmud_tractates ORDER BY tractate_order",
        &[],
    )?;
    decode_all(rows)
}
