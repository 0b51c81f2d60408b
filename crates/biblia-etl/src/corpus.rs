//! Bundled corpus file formats.
//!
//! Corpora are JSON arrays. Scripture corpora carry no explicit chapter or
//! verse numbers: both come from array position, so element order in the
//! file is significant and is preserved exactly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// The corpora a bootstrap run knows about, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corpus {
    Bible,
    Apocrypha,
    Quran,
    Hymns,
    Materials,
}

impl Corpus {
    pub const ALL: [Self; 5] = [
        Self::Bible,
        Self::Apocrypha,
        Self::Quran,
        Self::Hymns,
        Self::Materials,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bible => "bible",
            Self::Apocrypha => "apocrypha",
            Self::Quran => "quran",
            Self::Hymns => "hymns",
            Self::Materials => "materials",
        }
    }

    /// Fixed file name inside the corpus directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Bible => "bible.json",
            Self::Apocrypha => "apocrypha.json",
            Self::Quran => "quran.json",
            Self::Hymns => "hymns.json",
            Self::Materials => "materials.json",
        }
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Corpus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown corpus: {s}"))
    }
}

/// A book of a scripture corpus (Bible or Apocrypha).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptureBook {
    /// Short external code, e.g. `"gn"` or `"tb"`.
    pub abbrev: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Chapters in order, each an ordered list of verse texts.
    pub chapters: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranSurah {
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub name_arabic: Option<String>,
    pub verses: Vec<QuranVerseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranVerseEntry {
    pub number: u32,
    pub text_arabic: String,
    pub text_portuguese: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HymnEntry {
    pub number: u32,
    pub title: String,
    pub lyrics: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// A study material produced by the external PDF import step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub page_count: u32,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// Read and parse a corpus file.
pub fn read_corpus<T: DeserializeOwned>(path: &Path) -> LoadResult<Vec<T>> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::CorpusMissing {
        path: path.to_path_buf(),
        source,
    })?;
    parse_corpus(&raw, path)
}

/// Parse corpus text; `path` only labels errors.
pub fn parse_corpus<T: DeserializeOwned>(raw: &str, path: &Path) -> LoadResult<Vec<T>> {
    // Editors on Windows often save with a byte-order mark.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    serde_json::from_str(raw).map_err(|source| LoadError::CorpusMalformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scripture_shape() {
        let books: Vec<ScriptureBook> = parse_corpus(
            r#"[{"abbrev": "gn", "chapters": [["v1", "v2"], ["v1"]]}]"#,
            Path::new("bible.json"),
        )
        .unwrap();
        assert_eq!(books[0].abbrev, "gn");
        assert_eq!(books[0].name, None);
        assert_eq!(books[0].chapters[1], vec!["v1"]);
    }

    #[test]
    fn test_quran_and_material_field_names() {
        let surahs: Vec<QuranSurah> = parse_corpus(
            r#"[{"number": 1, "name": "Al-Fatiha", "nameArabic": "الفاتحة",
                 "verses": [{"number": 1, "textArabic": "بِسْمِ", "textPortuguese": "Em nome"}]}]"#,
            Path::new("quran.json"),
        )
        .unwrap();
        assert_eq!(surahs[0].verses[0].text_portuguese, "Em nome");

        let materials: Vec<MaterialEntry> = parse_corpus(
            r#"[{"id": "a", "title": "T", "content": "C", "pageCount": 4}]"#,
            Path::new("materials.json"),
        )
        .unwrap();
        assert_eq!(materials[0].page_count, 4);
        assert!(materials[0].added_at.is_none());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_corpus::<HymnEntry>(&temp_dir.path().join("hymns.json")).unwrap_err();
        assert!(matches!(err, LoadError::CorpusMissing { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hymns.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        let err = read_corpus::<HymnEntry>(&path).unwrap_err();
        assert!(matches!(err, LoadError::CorpusMalformed { .. }));
    }

    #[test]
    fn test_bom_prefixed_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bible.json");
        std::fs::write(&path, "\u{feff}[{\"abbrev\":\"gn\",\"chapters\":[[\"v1\"]]}]").unwrap();
        let books = read_corpus::<ScriptureBook>(&path).unwrap();
        assert_eq!(books[0].abbrev, "gn");
        assert_eq!(books[0].chapters, vec![vec!["v1".to_string()]]);
    }

    #[test]
    fn test_corpus_names() {
        assert_eq!("Quran".parse::<Corpus>().unwrap(), Corpus::Quran);
        assert!("talmud".parse::<Corpus>().is_err());
        assert_eq!(Corpus::Materials.file_name(), "materials.json");
    }
}
