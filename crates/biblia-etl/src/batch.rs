//! Multi-row upserts.
//!
//! [`BatchWriter`] buffers rows and writes them as one
//! `INSERT … VALUES (…),(…) ON CONFLICT(…) DO UPDATE` statement per batch.
//! It does not open a transaction itself; loaders wrap each book (or surah)
//! in [`Store::transaction`] and hand the transaction's store to the writer.

use biblia_core::schema::{Store, Value};
use biblia_core::{Error, Result};

/// Rows per statement unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Shape of an upsert: target table, inserted columns, natural key, and the
/// columns a conflicting row overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertSpec {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub key: &'static [&'static str],
    pub update: &'static [&'static str],
}

pub const VERSES: UpsertSpec = UpsertSpec {
    table: "verses",
    columns: &["book_id", "chapter_number", "verse_number", "text", "version_id"],
    key: &["book_id", "chapter_number", "verse_number", "version_id"],
    update: &["text"],
};

pub const QURAN_VERSES: UpsertSpec = UpsertSpec {
    table: "quran_verses",
    columns: &["surah_number", "verse_number", "text_arabic", "text_portuguese"],
    key: &["surah_number", "verse_number"],
    update: &["text_arabic", "text_portuguese"],
};

pub const HYMNS: UpsertSpec = UpsertSpec {
    table: "hymns",
    columns: &["number", "title", "lyrics", "category"],
    key: &["number"],
    update: &["title", "lyrics", "category"],
};

pub const STUDY_MATERIALS: UpsertSpec = UpsertSpec {
    table: "study_materials",
    columns: &["id", "title", "content", "page_count", "info", "added_at"],
    key: &["id"],
    update: &["title", "content", "page_count", "info", "added_at"],
};

impl UpsertSpec {
    /// SQL for a statement inserting `rows` rows.
    #[must_use]
    pub fn statement(&self, rows: usize) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        let values = vec![format!("({placeholders})"); rows].join(", ");
        let updates = self
            .update
            .iter()
            .map(|c| format!("{c} = excluded.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES {} ON CONFLICT({}) DO UPDATE SET {}",
            self.table,
            self.columns.join(", "),
            values,
            self.key.join(", "),
            updates
        )
    }
}

/// Buffered multi-row upsert writer.
#[derive(Debug)]
pub struct BatchWriter<'s> {
    store: &'s dyn Store,
    spec: &'static UpsertSpec,
    batch_size: usize,
    pending: Vec<Value>,
    pending_rows: usize,
    written: u64,
}

impl<'s> BatchWriter<'s> {
    /// A `batch_size` of zero is treated as one.
    pub fn new(store: &'s dyn Store, spec: &'static UpsertSpec, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            store,
            spec,
            batch_size,
            pending: Vec::with_capacity(batch_size * spec.columns.len()),
            pending_rows: 0,
            written: 0,
        }
    }

    /// Queue one row, writing the batch once it is full.
    pub fn push<I>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let before = self.pending.len();
        self.pending.extend(row);
        let width = self.pending.len() - before;
        if width != self.spec.columns.len() {
            self.pending.truncate(before);
            return Err(Error::InvalidData(format!(
                "{} row has {} values, expected {}",
                self.spec.table,
                width,
                self.spec.columns.len()
            )));
        }
        self.pending_rows += 1;
        if self.pending_rows >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write any queued rows.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending_rows == 0 {
            return Ok(());
        }
        let sql = self.spec.statement(self.pending_rows);
        self.store.run(&sql, &self.pending)?;
        log::debug!(
            "Upserted {} rows into {}",
            self.pending_rows,
            self.spec.table
        );
        self.written += self.pending_rows as u64;
        self.pending.clear();
        self.pending_rows = 0;
        Ok(())
    }

    /// Flush and return the number of rows written over the writer's life.
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblia_core::args;
    use biblia_core::schema::{count, Database};

    fn verse_row(book: u32, chapter: u32, verse: u32, text: &str) -> [Value; 5] {
        args![book, chapter, verse, text, "acf"]
    }

    #[test]
    fn test_statement_shape() {
        let sql = HYMNS.statement(2);
        assert_eq!(
            sql,
            "INSERT INTO hymns (number, title, lyrics, category) VALUES (?, ?, ?, ?), (?, ?, ?, ?) \
             ON CONFLICT(number) DO UPDATE SET title = excluded.title, lyrics = excluded.lyrics, \
             category = excluded.category"
        );
    }

    #[test]
    fn test_writes_partial_last_batch() {
        let db = Database::open_in_memory().unwrap();
        let mut writer = BatchWriter::new(&db, &VERSES, 100);
        for v in 1..=250 {
            writer.push(verse_row(19, 119, v, "lâmpada")).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 250);
        let n = count(&db, "SELECT COUNT(*) AS count FROM verses", &[]).unwrap();
        assert_eq!(n, 250);
    }

    #[test]
    fn test_conflicting_row_updates_text() {
        let db = Database::open_in_memory().unwrap();
        let mut writer = BatchWriter::new(&db, &VERSES, 10);
        writer.push(verse_row(1, 1, 1, "old")).unwrap();
        writer.flush().unwrap();
        writer.push(verse_row(1, 1, 1, "new")).unwrap();
        writer.finish().unwrap();

        let row = db
            .query_first("SELECT text FROM verses WHERE book_id = 1", &[])
            .unwrap()
            .unwrap();
        assert_eq!(row.text("text").unwrap(), "new");
        let n = count(&db, "SELECT COUNT(*) AS count FROM verses", &[]).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mut writer = BatchWriter::new(&db, &VERSES, 10);
        assert!(writer.push(args![1_u32, 1_u32]).is_err());
        assert_eq!(writer.finish().unwrap(), 0);
    }
}
