/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Bible versions (translations)
CREATE TABLE IF NOT EXISTS bible_versions (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    abbreviation TEXT NOT NULL,
    language TEXT NOT NULL,
    description TEXT
);

-- Books (Bible, Apocrypha; Torah is a view over 1-5)
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    testament TEXT NOT NULL CHECK(testament IN ('OT', 'NT', 'APOCRYPHA', 'QURAN', 'TORAH')),
    chapters INTEGER NOT NULL,
    abbreviation TEXT NOT NULL,
    book_order INTEGER NOT NULL
);

-- Verses, one row per (book, chapter, verse, version)
CREATE TABLE IF NOT EXISTS verses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_id INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    verse_number INTEGER NOT NULL,
    text TEXT NOT NULL,
    version_id TEXT NOT NULL REFERENCES bible_versions(id),
    UNIQUE(book_id, chapter_number, verse_number, version_id)
);

CREATE INDEX IF NOT EXISTS idx_verses_book_chapter ON verses(book_id, chapter_number);
CREATE INDEX IF NOT EXISTS idx_verses_version ON verses(version_id);

-- Quran verses (independent numbering, bilingual)
CREATE TABLE IF NOT EXISTS quran_verses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    surah_number INTEGER NOT NULL,
    verse_number INTEGER NOT NULL,
    text_arabic TEXT NOT NULL,
    text_portuguese TEXT NOT NULL,
    UNIQUE(surah_number, verse_number)
);

-- Talmud tractates (reference data)
CREATE TABLE IF NOT EXISTS talmud_tractates (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    name_hebrew TEXT NOT NULL,
    seder TEXT NOT NULL,
    pages INTEGER NOT NULL,
    tractate_order INTEGER NOT NULL
);

-- User bookmarks
CREATE TABLE IF NOT EXISTS bookmarks (
    id TEXT PRIMARY KEY,
    book_id INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    verse_number INTEGER NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_book ON bookmarks(book_id);

-- Verse highlights, at most one per verse
CREATE TABLE IF NOT EXISTS verse_highlights (
    id TEXT PRIMARY KEY,
    book_id INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    verse_number INTEGER NOT NULL,
    color TEXT NOT NULL CHECK(color IN ('yellow', 'green', 'blue', 'pink', 'orange')),
    created_at TEXT NOT NULL,
    UNIQUE(book_id, chapter_number, verse_number)
);

-- Reading history
CREATE TABLE IF NOT EXISTS reading_history (
    id TEXT PRIMARY KEY,
    book_id INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_history_timestamp ON reading_history(timestamp);
CREATE INDEX IF NOT EXISTS idx_history_chapter ON reading_history(book_id, chapter_number);

-- User settings (single row)
CREATE TABLE IF NOT EXISTS user_settings (
    id INTEGER PRIMARY KEY,
    preferred_version TEXT DEFAULT 'acf',
    preferred_language TEXT DEFAULT 'pt',
    font_size INTEGER DEFAULT 16,
    theme TEXT DEFAULT 'auto',
    notifications_enabled INTEGER DEFAULT 1,
    notification_time TEXT DEFAULT '08:00'
);

-- Hymnal
CREATE TABLE IF NOT EXISTS hymns (
    id INTEGER PRIMARY KEY,
    number INTEGER NOT NULL UNIQUE,
    title TEXT NOT NULL,
    lyrics TEXT NOT NULL,
    category TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

-- Reading plans
CREATE TABLE IF NOT EXISTS reading_plans (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    duration_days INTEGER NOT NULL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS reading_plan_days (
    id INTEGER PRIMARY KEY,
    plan_id INTEGER NOT NULL REFERENCES reading_plans(id),
    day_number INTEGER NOT NULL,
    readings TEXT NOT NULL,
    completed INTEGER DEFAULT 0,
    completed_at TEXT,
    UNIQUE(plan_id, day_number)
);

CREATE TABLE IF NOT EXISTS user_reading_progress (
    id INTEGER PRIMARY KEY,
    plan_id INTEGER NOT NULL UNIQUE REFERENCES reading_plans(id),
    current_day INTEGER DEFAULT 1,
    started_at TEXT DEFAULT CURRENT_TIMESTAMP,
    last_read_at TEXT
);

-- Study materials (pre-processed PDF imports)
CREATE TABLE IF NOT EXISTS study_materials (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    page_count INTEGER NOT NULL,
    info TEXT,
    added_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_materials_title ON study_materials(title);
"#;

const MIGRATION_002: &str = r#"
INSERT OR IGNORE INTO bible_versions (id, name, abbreviation, language, description) VALUES
    ('acf', 'Almeida Corrigida Fiel', 'ACF', 'pt', 'Tradução tradicional em português'),
    ('nvi', 'Nova Versão Internacional', 'NVI', 'pt', 'Tradução moderna em português'),
    ('ara', 'Almeida Revista e Atualizada', 'ARA', 'pt', 'Tradução atualizada em português'),
    ('kjv', 'King James Version', 'KJV', 'en', 'Traditional English translation'),
    ('niv', 'New International Version', 'NIV', 'en', 'Modern English translation'),
    ('rvr', 'Reina-Valera Revisada', 'RVR', 'es', 'Traducción tradicional en español');

INSERT OR IGNORE INTO talmud_tractates (id, name, name_hebrew, seder, pages, tractate_order) VALUES
    (1, 'Berachot', 'ברכות', 'Zeraim', 64, 1),
    (2, 'Shabbat', 'שבת', 'Moed', 157, 2),
    (3, 'Eruvin', 'עירובין', 'Moed', 105, 3),
    (4, 'Pesachim', 'פסחים', 'Moed', 121, 4),
    (5, 'Yoma', 'יומא', 'Moed', 88, 5),
    (6, 'Ketubot', 'כתובות', 'Nashim', 112, 6),
    (7, 'Baba Kamma', 'בבא קמא', 'Nezikin', 119, 7),
    (8, 'Sanhedrin', 'סנהדרין', 'Nezikin', 113, 8);

INSERT OR IGNORE INTO user_settings (id) VALUES (1);
"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: MIGRATION_001,
    },
    Migration {
        version: 2,
        name: "reference_data",
        sql: MIGRATION_002,
    },
];
