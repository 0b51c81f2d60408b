use chrono::Utc;

use crate::canon;
use crate::error::Result;
use crate::schema::row::Row;
use crate::schema::store::{RunResult, Store, Value};

const GENESIS_1_1: &str = "No princípio criou Deus o céu e a terra.";
const GENESIS_1_2: &str = "E a terra era sem forma e vazia; e havia trevas sobre a face do abismo; e o Espírito de Deus se movia sobre a face das águas.";

/// Store for environments without native storage.
///
/// It does not execute SQL. It answers a fixed set of canned queries,
/// matched on the text of the statement:
///
/// | call          | statement contains             | answer                                   |
/// |---------------|--------------------------------|------------------------------------------|
/// | `query_all`   | `FROM books`                   | canon table, filtered by a testament param or `id BETWEEN` range |
/// | `query_all`   | `FROM verses`                  | Genesis 1:1–2                            |
/// | `query_all`   | `FROM study_materials`         | two mock material summaries              |
/// | `query_first` | `COUNT(`                       | `count = 0`                              |
/// | `query_first` | `FROM verses`                  | Genesis 1:1                              |
/// | `query_first` | `FROM study_materials` + `id =`| one mock material with content           |
///
/// Everything else yields no rows. Writes succeed and change nothing, and
/// `transaction` runs its scope directly.
#[derive(Debug, Default)]
pub struct NullStore;

impl NullStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn books(sql: &str, params: &[Value]) -> Vec<Row> {
        let ids = if sql.contains("id BETWEEN") {
            match params {
                [Value::Integer(lo), Value::Integer(hi), ..] => Some(*lo..=*hi),
                _ => None,
            }
        } else {
            None
        };
        let testament = params.iter().find_map(|p| match p {
            Value::Text(t) => Some(t.as_str()),
            _ => None,
        });
        canon::BOOKS
            .iter()
            .filter(|b| ids.as_ref().map_or(true, |r| r.contains(&i64::from(b.id))))
            .filter(|b| testament.map_or(true, |t| b.testament.as_sql() == t))
            .map(|b| {
                Row::from_pairs([
                    ("id", Value::from(b.id)),
                    ("name", Value::Text(b.name.to_string())),
                    ("testament", Value::Text(b.testament.as_sql().to_string())),
                    ("chapters", Value::from(b.chapters)),
                    ("abbreviation", Value::Text(b.abbreviation.to_string())),
                    ("book_order", Value::from(b.id)),
                ])
            })
            .collect()
    }

    fn verse(id: i64, verse: i64, text: &str) -> Row {
        Row::from_pairs([
            ("id", Value::Integer(id)),
            ("book_id", Value::Integer(1)),
            ("chapter_number", Value::Integer(1)),
            ("verse_number", Value::Integer(verse)),
            ("text", Value::Text(text.to_string())),
            ("version_id", Value::Text("acf".to_string())),
        ])
    }

    fn material_summary(id: &str, title: &str, pages: i64) -> Row {
        Row::from_pairs([
            ("id", Value::Text(id.to_string())),
            ("title", Value::Text(title.to_string())),
            ("page_count", Value::Integer(pages)),
            ("added_at", Value::Text(Utc::now().to_rfc3339())),
        ])
    }

    fn material() -> Row {
        Row::from_pairs([
            ("id", Value::Text("mock-material-1".to_string())),
            ("title", Value::Text("Material de Exemplo".to_string())),
            (
                "content",
                Value::Text("Conteúdo de exemplo para ambientes sem armazenamento nativo.".to_string()),
            ),
            ("page_count", Value::Integer(10)),
            ("info", Value::Text("{}".to_string())),
            ("added_at", Value::Text(Utc::now().to_rfc3339())),
        ])
    }
}

impl Store for NullStore {
    fn execute_batch(&self, sql: &str) -> Result<()> {
        log::debug!("[null store] execute_batch: {:.50}", sql);
        Ok(())
    }

    fn run(&self, sql: &str, _params: &[Value]) -> Result<RunResult> {
        log::debug!("[null store] run: {}", sql);
        Ok(RunResult::default())
    }

    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        log::debug!("[null store] query_all: {}", sql);
        let rows = if sql.contains("FROM books") {
            Self::books(sql, params)
        } else if sql.contains("FROM verses") {
            vec![
                Self::verse(1, 1, GENESIS_1_1),
                Self::verse(2, 2, GENESIS_1_2),
            ]
        } else if sql.contains("FROM study_materials") {
            vec![
                Self::material_summary("mock-material-1", "Material de Exemplo", 10),
                Self::material_summary("mock-material-2", "Outro Material", 5),
            ]
        } else {
            Vec::new()
        };
        Ok(rows)
    }

    fn query_first(&self, sql: &str, _params: &[Value]) -> Result<Option<Row>> {
        log::debug!("[null store] query_first: {}", sql);
        let row = if sql.contains("COUNT(") {
            Some(Row::from_pairs([("count", Value::Integer(0))]))
        } else if sql.contains("FROM verses") {
            Some(Self::verse(1, 1, GENESIS_1_1))
        } else if sql.contains("FROM study_materials") && sql.contains("id =") {
            Some(Self::material())
        } else {
            None
        };
        Ok(row)
    }

    fn transaction(&self, scope: &mut dyn FnMut(&dyn Store) -> Result<()>) -> Result<()> {
        scope(self)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::count;

    #[test]
    fn test_books_query_returns_canon() {
        let store = NullStore::new();
        let rows = store.query_all("SELECT * FROM books ORDER BY book_order", &[]).unwrap();
        assert_eq!(rows.len(), canon::BOOKS.len());
    }

    #[test]
    fn test_books_query_filters_by_testament() {
        let store = NullStore::new();
        let rows = store
            .query_all(
                "SELECT * FROM books WHERE testament = ?1",
                &crate::args!["APOCRYPHA"],
            )
            .unwrap();
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn test_books_query_filters_by_id_range() {
        let store = NullStore::new();
        let rows = store
            .query_all(
                "SELECT * FROM books WHERE id BETWEEN ?1 AND ?2 ORDER BY book_order",
                &crate::args![1_u32, 5_u32],
            )
            .unwrap();
        assert_eq!(rows.len(), 5);

        let torah = crate::content::books(&store, Some(crate::model::Testament::Torah)).unwrap();
        assert_eq!(torah.len(), 5);
        assert_eq!(torah[0].id, 1);
        assert_eq!(torah[4].id, 5);
    }

    #[test]
    fn test_aggregates_report_zero() {
        let store = NullStore::new();
        assert_eq!(count(&store, "SELECT COUNT(*) AS count FROM verses", &[]).unwrap(), 0);
    }

    #[test]
    fn test_unknown_query_is_empty() {
        let store = NullStore::new();
        assert!(store.query_all("SELECT * FROM hymns", &[]).unwrap().is_empty());
        assert!(store.query_first("SELECT * FROM hymns", &[]).unwrap().is_none());
    }

    #[test]
    fn test_writes_change_nothing() {
        let store = NullStore::new();
        let result = store
            .run("INSERT INTO hymns (number) VALUES (?1)", &crate::args![1_u32])
            .unwrap();
        assert_eq!(result.changes, 0);
    }
}
