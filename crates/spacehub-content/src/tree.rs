//! Arena-backed module → chapter → document tree.
//!
//! Entities live in flat maps keyed by id with explicit parent links, and
//! each parent keeps an ordered list of child ids. Identifier assignment
//! is owned by the tree root through three [`IdSequence`]s:
//!
//! - modules are numbered in their own sequence
//! - chapters share one sequence across *all* modules
//! - documents share one sequence across *all* chapters
//!
//! Sequences only move forward, so an id is never handed out twice in a
//! session even after the entity that held it is deleted.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime, Timelike};
use spacehub_models::{
    Chapter, ChapterId, Document, DocumentDraft, DocumentFormat, DocumentId, DocumentType, Module,
    ModuleId, DEFAULT_DOCUMENT_LINK,
};

use crate::error::{ContentError, Result};

/// Monotonic id generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id (starting at 1), or `None` once `u64::MAX`
    /// has been handed out or observed.
    pub fn next_id(&mut self) -> Option<u64> {
        self.last = self.last.checked_add(1)?;
        Some(self.last)
    }

    /// Records an externally assigned id so later ids stay above it.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    /// Highest id handed out or observed so far.
    pub fn last(&self) -> u64 {
        self.last
    }
}

#[derive(Debug, Clone)]
struct ModuleNode {
    name: String,
    created_at: NaiveDateTime,
    duration: u32,
    chapters: Vec<ChapterId>,
}

#[derive(Debug, Clone)]
struct ChapterNode {
    module: ModuleId,
    name: String,
    created_at: NaiveDateTime,
    documents: Vec<DocumentId>,
}

#[derive(Debug, Clone)]
struct DocumentNode {
    chapter: ChapterId,
    title: String,
    doc_type: DocumentType,
    format: DocumentFormat,
    created_at: NaiveDateTime,
    link: String,
}

/// Ids removed by a cascading delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    pub chapters: Vec<ChapterId>,
    pub documents: Vec<DocumentId>,
}

/// The content tree.
#[derive(Debug, Clone)]
pub struct ContentTree {
    order: Vec<ModuleId>,
    modules: HashMap<ModuleId, ModuleNode>,
    chapters: HashMap<ChapterId, ChapterNode>,
    documents: HashMap<DocumentId, DocumentNode>,
    module_seq: IdSequence,
    chapter_seq: IdSequence,
    document_seq: IdSequence,
    default_link: String,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            modules: HashMap::new(),
            chapters: HashMap::new(),
            documents: HashMap::new(),
            module_seq: IdSequence::new(),
            chapter_seq: IdSequence::new(),
            document_seq: IdSequence::new(),
            default_link: DEFAULT_DOCUMENT_LINK.to_string(),
        }
    }

    /// Sets the link given to documents saved without one.
    pub fn with_default_link(mut self, link: impl Into<String>) -> Self {
        self.default_link = link.into();
        self
    }

    /// Builds a tree from nested modules, keeping their ids.
    ///
    /// Sequences are advanced past the highest id of each kind.
    pub fn from_modules(modules: Vec<Module>) -> Result<Self> {
        let mut tree = Self::new();
        for module in modules {
            tree.insert_module(module)?;
        }
        Ok(tree)
    }

    fn insert_module(&mut self, module: Module) -> Result<()> {
        if self.modules.contains_key(&module.id) {
            return Err(ContentError::DuplicateId {
                kind: "module",
                id: module.id.to_string(),
            });
        }
        self.module_seq.observe(module.id.get());

        let mut chapter_ids = Vec::with_capacity(module.chapters.len());
        for chapter in module.chapters {
            if self.chapters.contains_key(&chapter.id) {
                return Err(ContentError::DuplicateId {
                    kind: "chapter",
                    id: chapter.id.to_string(),
                });
            }
            self.chapter_seq.observe(chapter.id.get());

            let mut document_ids = Vec::with_capacity(chapter.documents.len());
            for doc in chapter.documents {
                if self.documents.contains_key(&doc.id) {
                    return Err(ContentError::DuplicateId {
                        kind: "document",
                        id: doc.id.to_string(),
                    });
                }
                self.document_seq.observe(doc.id.get());
                document_ids.push(doc.id);
                self.documents.insert(
                    doc.id,
                    DocumentNode {
                        chapter: chapter.id,
                        title: doc.title,
                        doc_type: doc.doc_type,
                        format: doc.format,
                        created_at: doc.created_at,
                        link: doc.link,
                    },
                );
            }

            chapter_ids.push(chapter.id);
            self.chapters.insert(
                chapter.id,
                ChapterNode {
                    module: module.id,
                    name: chapter.name,
                    created_at: chapter.created_at,
                    documents: document_ids,
                },
            );
        }

        self.order.push(module.id);
        self.modules.insert(
            module.id,
            ModuleNode {
                name: module.name,
                created_at: module.created_at,
                duration: module.duration,
                chapters: chapter_ids,
            },
        );
        Ok(())
    }

    /// Exports the tree in nested form, preserving order.
    pub fn to_modules(&self) -> Vec<Module> {
        self.order.iter().filter_map(|id| self.module(*id)).collect()
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Module ids in display order.
    pub fn module_ids(&self) -> &[ModuleId] {
        &self.order
    }

    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    /// Returns true if `chapter` exists and belongs to `module`.
    pub fn contains_chapter(&self, module: ModuleId, chapter: ChapterId) -> bool {
        self.chapter_module(chapter) == Some(module)
    }

    pub fn module_name(&self, id: ModuleId) -> Option<&str> {
        self.modules.get(&id).map(|m| m.name.as_str())
    }

    pub fn chapter_name(&self, id: ChapterId) -> Option<&str> {
        self.chapters.get(&id).map(|c| c.name.as_str())
    }

    /// Owning module of a chapter.
    pub fn chapter_module(&self, id: ChapterId) -> Option<ModuleId> {
        self.chapters.get(&id).map(|c| c.module)
    }

    /// Owning module and chapter of a document.
    pub fn ancestry(&self, id: DocumentId) -> Option<(ModuleId, ChapterId)> {
        let chapter = self.documents.get(&id)?.chapter;
        let module = self.chapter_module(chapter)?;
        Some((module, chapter))
    }

    /// Module with its chapters and documents.
    pub fn module(&self, id: ModuleId) -> Option<Module> {
        let node = self.modules.get(&id)?;
        Some(Module {
            id,
            name: node.name.clone(),
            created_at: node.created_at,
            duration: node.duration,
            chapters: node
                .chapters
                .iter()
                .filter_map(|c| self.chapter(*c))
                .collect(),
        })
    }

    /// Chapter with its documents.
    pub fn chapter(&self, id: ChapterId) -> Option<Chapter> {
        let node = self.chapters.get(&id)?;
        Some(Chapter {
            id,
            name: node.name.clone(),
            created_at: node.created_at,
            documents: self.chapter_documents(&node.documents),
        })
    }

    pub fn document(&self, id: DocumentId) -> Option<Document> {
        let node = self.documents.get(&id)?;
        Some(Document {
            id,
            title: node.title.clone(),
            doc_type: node.doc_type,
            format: node.format.clone(),
            created_at: node.created_at,
            link: node.link.clone(),
        })
    }

    fn chapter_documents(&self, ids: &[DocumentId]) -> Vec<Document> {
        ids.iter().filter_map(|d| self.document(*d)).collect()
    }

    /// Every document, in module → chapter → document order.
    pub fn all_documents(&self) -> Vec<Document> {
        self.order
            .iter()
            .flat_map(|m| self.module_documents(*m))
            .collect()
    }

    /// Documents across all chapters of one module.
    pub fn module_documents(&self, id: ModuleId) -> Vec<Document> {
        match self.modules.get(&id) {
            Some(node) => node
                .chapters
                .iter()
                .flat_map(|c| self.chapter_documents_by_id(*c))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Documents of one chapter.
    pub fn chapter_documents_by_id(&self, id: ChapterId) -> Vec<Document> {
        match self.chapters.get(&id) {
            Some(node) => self.chapter_documents(&node.documents),
            None => Vec::new(),
        }
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Appends a new, empty module.
    pub fn create_module(&mut self, name: &str) -> Result<Module> {
        let name = required(name, "module name")?;
        let id = ModuleId::new(
            self.module_seq
                .next_id()
                .ok_or(ContentError::IdsExhausted("module"))?,
        );
        let created_at = now();
        self.order.push(id);
        self.modules.insert(
            id,
            ModuleNode {
                name: name.clone(),
                created_at,
                duration: 0,
                chapters: Vec::new(),
            },
        );
        Ok(Module {
            id,
            name,
            created_at,
            duration: 0,
            chapters: Vec::new(),
        })
    }

    /// Renames a module. Returns false if it does not exist.
    pub fn rename_module(&mut self, id: ModuleId, name: &str) -> Result<bool> {
        let name = required(name, "module name")?;
        match self.modules.get_mut(&id) {
            Some(node) => {
                node.name = name;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes a module with all its chapters and documents.
    pub fn delete_module(&mut self, id: ModuleId) -> Option<Removed> {
        let node = self.modules.remove(&id)?;
        self.order.retain(|m| *m != id);

        let mut removed = Removed::default();
        for chapter in node.chapters {
            if let Some(chapter_node) = self.chapters.remove(&chapter) {
                for doc in chapter_node.documents {
                    self.documents.remove(&doc);
                    removed.documents.push(doc);
                }
            }
            removed.chapters.push(chapter);
        }
        Some(removed)
    }

    // ------------------------------------------------------------------
    // Chapters
    // ------------------------------------------------------------------

    /// Appends a new, empty chapter to a module.
    pub fn create_chapter(&mut self, module: ModuleId, name: &str) -> Result<Chapter> {
        let name = required(name, "chapter name")?;
        let parent = self
            .modules
            .get_mut(&module)
            .ok_or_else(|| ContentError::parent_not_found("module", module))?;

        let id = ChapterId::new(
            self.chapter_seq
                .next_id()
                .ok_or(ContentError::IdsExhausted("chapter"))?,
        );
        let created_at = now();
        parent.chapters.push(id);
        self.chapters.insert(
            id,
            ChapterNode {
                module,
                name: name.clone(),
                created_at,
                documents: Vec::new(),
            },
        );
        Ok(Chapter {
            id,
            name,
            created_at,
            documents: Vec::new(),
        })
    }

    /// Renames a chapter of `module`. Returns false if no such chapter.
    pub fn rename_chapter(&mut self, module: ModuleId, id: ChapterId, name: &str) -> Result<bool> {
        let name = required(name, "chapter name")?;
        match self.chapters.get_mut(&id) {
            Some(node) if node.module == module => {
                node.name = name;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Deletes a chapter of `module` together with its documents.
    pub fn delete_chapter(&mut self, module: ModuleId, id: ChapterId) -> Option<Removed> {
        if !self.contains_chapter(module, id) {
            return None;
        }
        let node = self.chapters.remove(&id)?;
        if let Some(parent) = self.modules.get_mut(&module) {
            parent.chapters.retain(|c| *c != id);
        }
        for doc in &node.documents {
            self.documents.remove(doc);
        }
        Some(Removed {
            chapters: vec![id],
            documents: node.documents,
        })
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    /// Appends a new document to a chapter of `module`.
    pub fn create_document(
        &mut self,
        module: ModuleId,
        chapter: ChapterId,
        draft: DocumentDraft,
    ) -> Result<Document> {
        let title = required(&draft.title, "document title")?;
        if !self.contains_module(module) {
            return Err(ContentError::parent_not_found("module", module));
        }
        if !self.contains_chapter(module, chapter) {
            return Err(ContentError::parent_not_found("chapter", chapter));
        }

        let id = DocumentId::new(
            self.document_seq
                .next_id()
                .ok_or(ContentError::IdsExhausted("document"))?,
        );
        let link = self.link_or_default(draft.link);
        let node = DocumentNode {
            chapter,
            title,
            doc_type: draft.doc_type,
            format: draft.format,
            created_at: now(),
            link,
        };
        if let Some(parent) = self.chapters.get_mut(&chapter) {
            parent.documents.push(id);
        }
        self.documents.insert(id, node);

        self.document(id)
            .ok_or_else(|| ContentError::not_found("document", id))
    }

    /// Replaces title, type, format and link of a document.
    /// Returns false if the document is not in that module/chapter.
    pub fn update_document(
        &mut self,
        module: ModuleId,
        chapter: ChapterId,
        id: DocumentId,
        draft: DocumentDraft,
    ) -> Result<bool> {
        let title = required(&draft.title, "document title")?;
        if self.ancestry(id) != Some((module, chapter)) {
            return Ok(false);
        }
        let link = self.link_or_default(draft.link);
        match self.documents.get_mut(&id) {
            Some(node) => {
                node.title = title;
                node.doc_type = draft.doc_type;
                node.format = draft.format;
                node.link = link;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes a document of `module`/`chapter`. Returns false if absent.
    pub fn delete_document(&mut self, module: ModuleId, chapter: ChapterId, id: DocumentId) -> bool {
        if self.ancestry(id) != Some((module, chapter)) {
            return false;
        }
        self.documents.remove(&id);
        if let Some(parent) = self.chapters.get_mut(&chapter) {
            parent.documents.retain(|d| *d != id);
        }
        true
    }

    fn link_or_default(&self, link: String) -> String {
        if link.trim().is_empty() {
            self.default_link.clone()
        } else {
            link
        }
    }
}

fn required(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::InvalidInput(format!("{} is required", what)));
    }
    Ok(trimmed.to_string())
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
