//! Course content types: modules, chapters and documents.
//!
//! These are the nested, serializable shapes. The content browser keeps
//! them in an arena internally and converts back to this form on export.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ChapterId, DocumentId, ModuleId};

/// Link used when a document is saved without one.
pub const DEFAULT_DOCUMENT_LINK: &str = "https://css4.pub/2015/textbook/somatosensory.pdf";

/// Kind of learning material a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    #[default]
    Course,
    Exercise,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Course => "COURSE",
            DocumentType::Exercise => "EXERCISE",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COURSE" => Ok(DocumentType::Course),
            "EXERCISE" => Ok(DocumentType::Exercise),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

/// File format of a document. Unknown formats are kept verbatim (upper-cased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Mp4,
    Other(String),
}

impl DocumentFormat {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Mp4 => "MP4",
            DocumentFormat::Other(s) => s,
        }
    }

    /// Lower-case file extension used when downloading.
    pub fn extension(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl From<String> for DocumentFormat {
    fn from(s: String) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PDF" => DocumentFormat::Pdf,
            "MP4" => DocumentFormat::Mp4,
            other => DocumentFormat::Other(other.to_string()),
        }
    }
}

impl From<&str> for DocumentFormat {
    fn from(s: &str) -> Self {
        DocumentFormat::from(s.to_string())
    }
}

impl From<DocumentFormat> for String {
    fn from(format: DocumentFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `YYYY-MM-DD HH:MM:SS` timestamps, as used by the content catalogue.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A single piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub format: DocumentFormat,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    pub link: String,
}

/// An ordered group of documents inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Top-level content grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    /// Duration metric (hours).
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Fields supplied when creating or editing a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    #[serde(rename = "type", default)]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub format: DocumentFormat,
    /// Empty means "use the default link".
    #[serde(default)]
    pub link: String,
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            title: title.into(),
            doc_type,
            format: DocumentFormat::Pdf,
            link: String::new(),
        }
    }

    pub fn format(mut self, format: impl Into<DocumentFormat>) -> Self {
        self.format = format.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_format_extensible() {
        assert_eq!(DocumentFormat::from("pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from("Mp4"), DocumentFormat::Mp4);
        assert_eq!(DocumentFormat::from("docx"), DocumentFormat::Other("DOCX".into()));
        assert_eq!(DocumentFormat::Other("DOCX".into()).extension(), "docx");
    }

    #[test]
    fn test_document_type_parse() {
        assert_eq!("exercise".parse::<DocumentType>().unwrap(), DocumentType::Exercise);
        assert!("video".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_module_json_shape() {
        let json = r#"{
            "id": 1,
            "name": "Product Demos",
            "created_at": "2025-02-17 12:30:50",
            "duration": 2,
            "chapters": [{
                "id": 1,
                "name": "Software Demos",
                "created_at": "2025-02-17 12:30:50",
                "documents": [{
                    "id": 1,
                    "title": "Introduction",
                    "type": "COURSE",
                    "format": "PDF",
                    "created_at": "2025-03-15 11:25:10",
                    "link": "https://example.com/intro.pdf"
                }]
            }]
        }"#;

        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.id, ModuleId::new(1));
        let doc = &module.chapters[0].documents[0];
        assert_eq!(doc.doc_type, DocumentType::Course);
        assert_eq!(doc.format, DocumentFormat::Pdf);

        let out = serde_json::to_value(&module).unwrap();
        assert_eq!(out["created_at"], "2025-02-17 12:30:50");
        assert_eq!(out["chapters"][0]["documents"][0]["type"], "COURSE");
    }
}
