//! Document search and type-tab filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use spacehub_models::{Document, DocumentType};

/// Type tab shown above the document list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTab {
    #[default]
    All,
    Exercise,
    Course,
}

impl TypeTab {
    /// Returns true if documents of `doc_type` belong under this tab.
    pub fn matches(self, doc_type: DocumentType) -> bool {
        match self {
            TypeTab::All => true,
            TypeTab::Exercise => doc_type == DocumentType::Exercise,
            TypeTab::Course => doc_type == DocumentType::Course,
        }
    }
}

impl fmt::Display for TypeTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeTab::All => "all",
            TypeTab::Exercise => "exercise",
            TypeTab::Course => "course",
        };
        f.write_str(s)
    }
}

impl FromStr for TypeTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TypeTab::All),
            "exercise" => Ok(TypeTab::Exercise),
            "course" => Ok(TypeTab::Course),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

/// Free-text query plus type tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    query: String,
    tab: TypeTab,
}

impl DocumentFilter {
    pub fn new(query: impl Into<String>, tab: TypeTab) -> Self {
        Self {
            query: query.into(),
            tab,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tab(&self) -> TypeTab {
        self.tab
    }

    /// Case-insensitive title substring match and tab match.
    pub fn matches(&self, doc: &Document) -> bool {
        self.tab.matches(doc.doc_type)
            && doc
                .title
                .to_lowercase()
                .contains(&self.query.to_lowercase())
    }

    /// Keeps the matching documents, preserving order.
    pub fn apply(&self, docs: Vec<Document>) -> Vec<Document> {
        docs.into_iter().filter(|d| self.matches(d)).collect()
    }
}
