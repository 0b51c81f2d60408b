use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Freshly created ids are UUID v4 strings; ids restored from a
        /// backup keep whatever text they were exported with.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn from_string(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(BookmarkId, "Unique identifier for a bookmark.");
define_id!(HighlightId, "Unique identifier for a verse highlight.");
define_id!(HistoryId, "Unique identifier for a reading-history entry.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_id_generation() {
        let id1 = BookmarkId::new();
        let id2 = BookmarkId::new();
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_id_from_legacy_string() {
        let id = HighlightId::from_string("highlight_1700000000_abc123");
        assert_eq!(id.to_string(), "highlight_1700000000_abc123");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = HistoryId::from_string("h-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"h-1\"");
    }
}
