pub mod annotation;
pub mod book;
pub mod history;
pub mod hymn;
pub mod ids;
pub mod material;
pub mod plan;
pub mod quran;
pub mod verse;
pub mod version;

pub use annotation::{Bookmark, Highlight, HighlightColor};
pub use book::{Book, Testament};
pub use history::HistoryEntry;
pub use hymn::Hymn;
pub use ids::{BookmarkId, HighlightId, HistoryId};
pub use material::{MaterialSummary, StudyMaterial, Tractate};
pub use plan::{PlanDay, Reading, ReadingPlan, UserReadingProgress};
pub use quran::QuranVerse;
pub use verse::{NewVerse, Verse, VerseRef};
pub use version::{BibleVersion, DEFAULT_VERSION};
