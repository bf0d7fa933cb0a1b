//! Strongly-typed identifiers.
//!
//! Calendar events use generated string ids. Content-tree entities use
//! integer ids handed out by the tree's own sequences; see
//! `spacehub_content::tree::IdSequence`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a fresh, unique event id (`event-<uuid>`).
    pub fn new() -> Self {
        Self(format!("event-{}", Uuid::new_v4().simple()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw integer id.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Breadcrumb key, e.g. `module-3`.
            pub fn key(self) -> String {
                format!(concat!($prefix, "-{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a module (top level of the content tree).
    ModuleId,
    "module"
);
numeric_id!(
    /// Identifier of a chapter, unique across every module.
    ChapterId,
    "chapter"
);
numeric_id!(
    /// Identifier of a document, unique across every chapter.
    DocumentId,
    "document"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_unique() {
        let a = EventId::new();
        let b = EventId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("event-"));
    }

    #[test]
    fn test_numeric_id_display() {
        assert_eq!(ModuleId::new(1).to_string(), "module-1");
        assert_eq!(ChapterId::new(12).key(), "chapter-12");
        assert_eq!(DocumentId::from(4).get(), 4);
    }

    #[test]
    fn test_numeric_id_serializes_as_integer() {
        let json = serde_json::to_string(&DocumentId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: DocumentId = serde_json::from_str("7").unwrap();
        assert_eq!(back, DocumentId::new(7));
    }
}
