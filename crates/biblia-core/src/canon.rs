//! Canonical book table and the lookup tables built on it.
//!
//! Book ids 1–66 are the Protestant canon in traditional order; 67–73 are the
//! deuterocanonical books shipped in the Apocrypha corpus. Corpus files name
//! books by a short Portuguese code (`gn`, `1sm`, `tb`), the remote text API
//! by an English slug (`genesis`, `1samuel`).

use std::ops::RangeInclusive;

use crate::model::{Book, Testament};

/// Canonical Bible books, excluding the Apocrypha.
pub const TOTAL_BOOKS: u32 = 66;
/// Chapters across the 66 canonical books.
pub const TOTAL_CHAPTERS: u32 = 1_189;
/// Verses in a complete single-version Bible.
pub const TOTAL_VERSES: u32 = 31_102;
pub const OT_CHAPTERS: u32 = 929;
pub const NT_CHAPTERS: u32 = 260;

pub const CANONICAL_IDS: RangeInclusive<u32> = 1..=66;
pub const OT_IDS: RangeInclusive<u32> = 1..=39;
pub const NT_IDS: RangeInclusive<u32> = 40..=66;
pub const TORAH_IDS: RangeInclusive<u32> = 1..=5;
/// Book ids reserved for Apocrypha content (67–73 are assigned).
pub const APOCRYPHA_IDS: RangeInclusive<u32> = 67..=80;

/// One row of the canon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonBook {
    pub id: u32,
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub testament: Testament,
    pub chapters: u32,
    /// Short code used by bundled corpus files.
    pub corpus_code: &'static str,
    /// Book slug understood by the remote text API.
    pub remote_name: Option<&'static str>,
}

impl CanonBook {
    #[must_use]
    pub fn to_book(&self) -> Book {
        Book {
            id: self.id,
            name: self.name.to_string(),
            testament: self.testament,
            chapters: self.chapters,
            abbreviation: self.abbreviation.to_string(),
            order: self.id,
        }
    }
}

const fn ot(
    id: u32,
    name: &'static str,
    abbreviation: &'static str,
    chapters: u32,
    corpus_code: &'static str,
    remote: &'static str,
) -> CanonBook {
    CanonBook {
        id,
        name,
        abbreviation,
        testament: Testament::Ot,
        chapters,
        corpus_code,
        remote_name: Some(remote),
    }
}

const fn nt(
    id: u32,
    name: &'static str,
    abbreviation: &'static str,
    chapters: u32,
    corpus_code: &'static str,
    remote: &'static str,
) -> CanonBook {
    CanonBook {
        testament: Testament::Nt,
        ..ot(id, name, abbreviation, chapters, corpus_code, remote)
    }
}

const fn apocrypha(
    id: u32,
    name: &'static str,
    abbreviation: &'static str,
    chapters: u32,
    corpus_code: &'static str,
) -> CanonBook {
    CanonBook {
        id,
        name,
        abbreviation,
        testament: Testament::Apocrypha,
        chapters,
        corpus_code,
        remote_name: None,
    }
}

pub const BOOKS: &[CanonBook] = &[
    ot(1, "Gênesis", "Gn", 50, "gn", "genesis"),
    ot(2, "Êxodo", "Ex", 40, "ex", "exodus"),
    ot(3, "Levítico", "Lv", 27, "lv", "leviticus"),
    ot(4, "Números", "Nm", 36, "nm", "numbers"),
    ot(5, "Deuteronômio", "Dt", 34, "dt", "deuteronomy"),
    ot(6, "Josué", "Js", 24, "js", "joshua"),
    ot(7, "Juízes", "Jz", 21, "jz", "judges"),
    ot(8, "Rute", "Rt", 4, "rt", "ruth"),
    ot(9, "1 Samuel", "1Sm", 31, "1sm", "1samuel"),
    ot(10, "2 Samuel", "2Sm", 24, "2sm", "2samuel"),
    ot(11, "1 Reis", "1Rs", 22, "1rs", "1kings"),
    ot(12, "2 Reis", "2Rs", 25, "2rs", "2kings"),
    ot(13, "1 Crônicas", "1Cr", 29, "1cr", "1chronicles"),
    ot(14, "2 Crônicas", "2Cr", 36, "2cr", "2chronicles"),
    ot(15, "Esdras", "Ed", 10, "ed", "ezra"),
    ot(16, "Neemias", "Ne", 13, "ne", "nehemiah"),
    ot(17, "Ester", "Et", 10, "et", "esther"),
    ot(18, "Jó", "Jó", 42, "job", "job"),
    ot(19, "Salmos", "Sl", 150, "sl", "psalms"),
    ot(20, "Provérbios", "Pv", 31, "pv", "proverbs"),
    ot(21, "Eclesiastes", "Ec", 12, "ec", "ecclesiastes"),
    ot(22, "Cânticos", "Ct", 8, "ct", "song+of+solomon"),
    ot(23, "Isaías", "Is", 66, "is", "isaiah"),
    ot(24, "Jeremias", "Jr", 52, "jr", "jeremiah"),
    ot(25, "Lamentações", "Lm", 5, "lm", "lamentations"),
    ot(26, "Ezequiel", "Ez", 48, "ez", "ezekiel"),
    ot(27, "Daniel", "Dn", 12, "dn", "daniel"),
    ot(28, "Oséias", "Os", 14, "os", "hosea"),
    ot(29, "Joel", "Jl", 3, "jl", "joel"),
    ot(30, "Amós", "Am", 9, "am", "amos"),
    ot(31, "Obadias", "Ob", 1, "ob", "obadiah"),
    ot(32, "Jonas", "Jn", 4, "jn", "jonah"),
    ot(33, "Miquéias", "Mq", 7, "mq", "micah"),
    ot(34, "Naum", "Na", 3, "na", "nahum"),
    ot(35, "Habacuque", "Hc", 3, "hc", "habakkuk"),
    ot(36, "Sofonias", "Sf", 3, "sf", "zephaniah"),
    ot(37, "Ageu", "Ag", 2, "ag", "haggai"),
    ot(38, "Zacarias", "Zc", 14, "zc", "zechariah"),
    ot(39, "Malaquias", "Ml", 4, "ml", "malachi"),
    nt(40, "Mateus", "Mt", 28, "mt", "matthew"),
    nt(41, "Marcos", "Mc", 16, "mc", "mark"),
    nt(42, "Lucas", "Lc", 24, "lc", "luke"),
    nt(43, "João", "Jo", 21, "jo", "john"),
    nt(44, "Atos", "At", 28, "at", "acts"),
    nt(45, "Romanos", "Rm", 16, "rm", "romans"),
    nt(46, "1 Coríntios", "1Co", 16, "1co", "1corinthians"),
    nt(47, "2 Coríntios", "2Co", 13, "2co", "2corinthians"),
    nt(48, "Gálatas", "Gl", 6, "gl", "galatians"),
    nt(49, "Efésios", "Ef", 6, "ef", "ephesians"),
    nt(50, "Filipenses", "Fp", 4, "fp", "philippians"),
    nt(51, "Colossenses", "Cl", 4, "cl", "colossians"),
    nt(52, "1 Tessalonicenses", "1Ts", 5, "1ts", "1thessalonians"),
    nt(53, "2 Tessalonicenses", "2Ts", 3, "2ts", "2thessalonians"),
    nt(54, "1 Timóteo", "1Tm", 6, "1tm", "1timothy"),
    nt(55, "2 Timóteo", "2Tm", 4, "2tm", "2timothy"),
    nt(56, "Tito", "Tt", 3, "tt", "titus"),
    nt(57, "Filemom", "Fm", 1, "fm", "philemon"),
    nt(58, "Hebreus", "Hb", 13, "hb", "hebrews"),
    nt(59, "Tiago", "Tg", 5, "tg", "james"),
    nt(60, "1 Pedro", "1Pe", 5, "1pe", "1peter"),
    nt(61, "2 Pedro", "2Pe", 3, "2pe", "2peter"),
    nt(62, "1 João", "1Jo", 5, "1jo", "1john"),
    nt(63, "2 João", "2Jo", 1, "2jo", "2john"),
    nt(64, "3 João", "3Jo", 1, "3jo", "3john"),
    nt(65, "Judas", "Jd", 1, "jd", "jude"),
    nt(66, "Apocalipse", "Ap", 22, "ap", "revelation"),
    apocrypha(67, "Tobias", "Tb", 14, "tb"),
    apocrypha(68, "Judite", "Jt", 16, "jt"),
    apocrypha(69, "Sabedoria", "Sb", 19, "sb"),
    apocrypha(70, "Eclesiástico", "Eclo", 51, "eclo"),
    apocrypha(71, "Baruque", "Br", 6, "br"),
    apocrypha(72, "1 Macabeus", "1Mc", 16, "1mc"),
    apocrypha(73, "2 Macabeus", "2Mc", 15, "2mc"),
];

#[must_use]
pub fn by_id(id: u32) -> Option<&'static CanonBook> {
    BOOKS.iter().find(|b| b.id == id)
}

fn by_code(code: &str, ids: &RangeInclusive<u32>) -> Option<u32> {
    let code = code.trim().to_lowercase();
    BOOKS
        .iter()
        .find(|b| ids.contains(&b.id) && b.corpus_code == code)
        .map(|b| b.id)
}

/// Resolve a Bible corpus code (`"gn"`, `"1co"`) to its canonical id.
#[must_use]
pub fn bible_book_id(code: &str) -> Option<u32> {
    by_code(code, &CANONICAL_IDS)
}

/// Resolve an Apocrypha corpus code (`"tb"`, `"2mc"`) to its id (67–73).
#[must_use]
pub fn apocrypha_book_id(code: &str) -> Option<u32> {
    by_code(code, &APOCRYPHA_IDS)
}

/// Remote API slug for a canonical book; `None` outside 1–66.
#[must_use]
pub fn remote_name(book_id: u32) -> Option<&'static str> {
    by_id(book_id).and_then(|b| b.remote_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters_in(ids: &RangeInclusive<u32>) -> u32 {
        BOOKS
            .iter()
            .filter(|b| ids.contains(&b.id))
            .map(|b| b.chapters)
            .sum()
    }

    #[test]
    fn test_canonical_totals_match_table() {
        assert_eq!(chapters_in(&OT_IDS), OT_CHAPTERS);
        assert_eq!(chapters_in(&NT_IDS), NT_CHAPTERS);
        assert_eq!(chapters_in(&CANONICAL_IDS), TOTAL_CHAPTERS);
        let canonical = BOOKS.iter().filter(|b| CANONICAL_IDS.contains(&b.id)).count();
        assert_eq!(canonical, TOTAL_BOOKS as usize);
    }

    #[test]
    fn test_ids_are_sequential() {
        for (idx, book) in BOOKS.iter().enumerate() {
            assert_eq!(book.id as usize, idx + 1);
        }
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(bible_book_id("gn"), Some(1));
        assert_eq!(bible_book_id("GN"), Some(1));
        assert_eq!(bible_book_id("mt"), Some(40));
        assert_eq!(bible_book_id("ap"), Some(66));
        assert_eq!(bible_book_id("xx"), None);
    }

    #[test]
    fn test_code_lookup_is_scoped() {
        assert_eq!(bible_book_id("tb"), None);
        assert_eq!(apocrypha_book_id("tb"), Some(67));
        assert_eq!(apocrypha_book_id("2mc"), Some(73));
        assert_eq!(apocrypha_book_id("gn"), None);
    }

    #[test]
    fn test_remote_names() {
        assert_eq!(remote_name(43), Some("john"));
        assert_eq!(remote_name(22), Some("song+of+solomon"));
        assert_eq!(remote_name(67), None);
        assert_eq!(remote_name(999), None);
    }
}
