use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::canon;
use crate::error::{Error, Result};
use crate::schema::row::Row;
use crate::schema::store::{RunResult, Store, Value};

use super::migrations::MIGRATIONS;

/// SQLite-backed [`Store`].
///
/// Opening applies pending migrations and seeds the canon book table, so a
/// freshly opened database is always ready for loaders. The handle is an
/// explicit value: callers own it, pass `&dyn Store` to components, and
/// tear it down with [`Store::close`].
#[derive(Debug)]
pub struct Database {
    conn: Option<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let db = Self { conn: Some(conn) };
        log::info!("Initializing database");
        db.apply_migrations()?;
        db.seed_books()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    pub fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::Closed)
    }

    fn apply_migrations(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                conn.execute_batch(migration.sql)?;
                conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }

    fn seed_books(&self) -> Result<()> {
        self.transaction(&mut |store| {
            for book in canon::BOOKS {
                store.run(
                    "INSERT OR IGNORE INTO books (id, name, testament, chapters, abbreviation, book_order)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    &crate::args![
                        book.id,
                        book.name,
                        book.testament.as_sql(),
                        book.chapters,
                        book.abbreviation,
                        book.id,
                    ],
                )?;
            }
            Ok(())
        })
    }

    fn collect_rows(&self, sql: &str, params: &[Value], limit: Option<usize>) -> Result<Vec<Row>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
            .into();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..columns.len())
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            out.push(Row::new(Arc::clone(&columns), values));
            if limit.is_some_and(|n| out.len() >= n) {
                break;
            }
        }
        Ok(out)
    }
}

impl Store for Database {
    fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }

    fn run(&self, sql: &str, params: &[Value]) -> Result<RunResult> {
        let conn = self.conn()?;
        let changes = conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(RunResult {
            changes: changes as u64,
            last_insert_rowid: conn.last_insert_rowid(),
        })
    }

    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.collect_rows(sql, params, None)
    }

    fn query_first(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        Ok(self.collect_rows(sql, params, Some(1))?.into_iter().next())
    }

    fn transaction(&self, scope: &mut dyn FnMut(&dyn Store) -> Result<()>) -> Result<()> {
        let tx = self.conn()?.unchecked_transaction()?;
        // Dropping `tx` on the error path rolls back.
        scope(self)?;
        tx.commit()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| Error::Database(e))?;
            log::debug!("Database connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::count;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let applied = count(&db, "SELECT COUNT(*) AS count FROM schema_migrations", &[]).unwrap();
        assert_eq!(applied, MIGRATIONS.len() as u64);
    }

    #[test]
    fn test_seeds_books_and_versions() {
        let db = Database::open_in_memory().unwrap();
        let books = count(&db, "SELECT COUNT(*) AS count FROM books", &[]).unwrap();
        assert_eq!(books, canon::BOOKS.len() as u64);
        let versions = count(&db, "SELECT COUNT(*) AS count FROM bible_versions", &[]).unwrap();
        assert_eq!(versions, 6);
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("biblia.db");

        let mut first = Database::open(&path).unwrap();
        first.close().unwrap();
        let second = Database::open(&path).unwrap();

        let books = count(&second, "SELECT COUNT(*) AS count FROM books", &[]).unwrap();
        assert_eq!(books, canon::BOOKS.len() as u64);
        let settings = count(&second, "SELECT COUNT(*) AS count FROM user_settings", &[]).unwrap();
        assert_eq!(settings, 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();
        let result = db.transaction(&mut |store| {
            store.run(
                "INSERT INTO hymns (number, title, lyrics) VALUES (?1, ?2, ?3)",
                &crate::args![1_u32, "Chuvas de Graça", "..."],
            )?;
            Err(Error::InvalidData("abort".to_string()))
        });
        assert!(result.is_err());
        let hymns = count(&db, "SELECT COUNT(*) AS count FROM hymns", &[]).unwrap();
        assert_eq!(hymns, 0);
    }

    #[test]
    fn test_transaction_commits() {
        let db = Database::open_in_memory().unwrap();
        db.transaction(&mut |store| {
            store.run(
                "INSERT INTO hymns (number, title, lyrics) VALUES (?1, ?2, ?3)",
                &crate::args![1_u32, "Chuvas de Graça", "..."],
            )?;
            Ok(())
        })
        .unwrap();
        let hymns = count(&db, "SELECT COUNT(*) AS count FROM hymns", &[]).unwrap();
        assert_eq!(hymns, 1);
    }

    #[test]
    fn test_query_first_returns_named_columns() {
        let db = Database::open_in_memory().unwrap();
        let row = db
            .query_first("SELECT id, name FROM books WHERE id = ?1", &crate::args![43_u32])
            .unwrap()
            .unwrap();
        assert_eq!(row.text("name").unwrap(), "João");
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_calls_after_close_fail() {
        let mut db = Database::open_in_memory().unwrap();
        db.close().unwrap();
        assert!(matches!(
            db.query_all("SELECT 1", &[]),
            Err(Error::Closed)
        ));
        // Closing twice is harmless.
        db.close().unwrap();
    }
}
