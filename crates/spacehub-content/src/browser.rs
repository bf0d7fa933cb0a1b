//! ContentBrowser - navigation, expansion and CRUD over the content tree.
//!
//! The tree and every piece of view state derived from it (breadcrumb
//! path, expanded modules, previewed document, search) sit behind one
//! `RwLock`, so a mutation and the view fix-ups it implies are applied
//! together.

use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use spacehub_models::{
    Chapter, ChapterId, Document, DocumentDraft, DocumentId, Module, ModuleId,
};
use tracing::{debug, info};

use crate::error::{ContentError, Result};
use crate::filter::{DocumentFilter, TypeTab};
use crate::path::{Breadcrumb, BreadcrumbPath};
use crate::tree::{ContentTree, Removed};

/// Which kind of entity a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Module(ModuleId),
    Chapter(ChapterId),
    Document(DocumentId),
}

impl EntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Module(_) => "Module",
            EntityRef::Chapter(_) => "Chapter",
            EntityRef::Document(_) => "Document",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Change notification broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNotice {
    pub change: ChangeKind,
    pub entity: EntityRef,
    /// Name or title of the entity at the time of the change.
    pub name: String,
}

impl ContentNotice {
    /// Short heading, e.g. "Module created".
    pub fn title(&self) -> String {
        let verb = match self.change {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        };
        format!("{} {}", self.entity.kind(), verb)
    }
}

impl fmt::Display for ContentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change {
            ChangeKind::Created => write!(f, "{} has been created successfully.", self.name),
            ChangeKind::Updated => write!(f, "{} has been updated successfully.", self.name),
            ChangeKind::Deleted => write!(f, "{} has been deleted.", self.name),
        }
    }
}

#[derive(Debug)]
struct BrowserState {
    tree: ContentTree,
    path: BreadcrumbPath,
    /// Sidebar expansion, keyed by module. View state only.
    expanded: HashMap<ModuleId, bool>,
    /// Document shown in the preview panel.
    selected: Option<DocumentId>,
    results_minimized: bool,
    search: DocumentFilter,
}

impl BrowserState {
    /// Flattened documents at the current path.
    fn documents_in_view(&self) -> Vec<Document> {
        match self.path {
            BreadcrumbPath::Root => self.tree.all_documents(),
            BreadcrumbPath::Module(m) => self.tree.module_documents(m),
            BreadcrumbPath::Chapter(_, c) => self.tree.chapter_documents_by_id(c),
        }
    }

    fn validate(&self, path: BreadcrumbPath) -> Result<()> {
        match path {
            BreadcrumbPath::Root => Ok(()),
            BreadcrumbPath::Module(m) => {
                if self.tree.contains_module(m) {
                    Ok(())
                } else {
                    Err(ContentError::not_found("module", m))
                }
            }
            BreadcrumbPath::Chapter(m, c) => {
                if !self.tree.contains_module(m) {
                    Err(ContentError::not_found("module", m))
                } else if !self.tree.contains_chapter(m, c) {
                    Err(ContentError::not_found("chapter", c))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn set_path(&mut self, path: BreadcrumbPath) {
        if let Some(m) = path.module() {
            self.expanded.insert(m, true);
        }
        self.path = path;
    }

    /// Drops view references to anything a cascade removed.
    fn forget(&mut self, removed: &Removed) {
        if let Some(selected) = self.selected {
            if removed.documents.contains(&selected) {
                self.selected = None;
            }
        }
    }
}

/// Thread-safe content browser.
///
/// # Example
///
/// ```
/// use spacehub_content::{BreadcrumbPath, ContentBrowser, TypeTab};
/// use spacehub_models::{DocumentDraft, DocumentType};
///
/// let browser = ContentBrowser::default();
/// let module = browser.create_module("Product Demos").unwrap();
/// let chapter = browser.create_chapter(module.id, "Software Demos").unwrap();
/// browser
///     .create_document(module.id, chapter.id, DocumentDraft::new("Introduction", DocumentType::Course))
///     .unwrap();
///
/// browser.navigate_to(BreadcrumbPath::Module(module.id)).unwrap();
/// let docs = browser.filter_documents("intro", TypeTab::Course);
/// assert_eq!(docs.len(), 1);
/// ```
pub struct ContentBrowser {
    state: RwLock<BrowserState>,
    subscribers: RwLock<Vec<Sender<ContentNotice>>>,
}

impl Default for ContentBrowser {
    fn default() -> Self {
        Self::new(ContentTree::new())
    }
}

impl ContentBrowser {
    /// Creates a browser over `tree`, at the root, with every module
    /// collapsed and the results panel minimized.
    pub fn new(tree: ContentTree) -> Self {
        let expanded = tree.module_ids().iter().map(|m| (*m, false)).collect();
        Self {
            state: RwLock::new(BrowserState {
                tree,
                path: BreadcrumbPath::Root,
                expanded,
                selected: None,
                results_minimized: true,
                search: DocumentFilter::default(),
            }),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BrowserState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BrowserState>> {
        self.state.write().map_err(lock_error)
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> Receiver<ContentNotice> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }
        rx
    }

    fn broadcast(&self, change: ChangeKind, entity: EntityRef, name: String) {
        info!(?entity, ?change, name = %name, "Content changed");
        let notice = ContentNotice {
            change,
            entity,
            name,
        };
        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(notice.clone()).is_ok());
        }
    }

    /// Runs `f` with read access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&ContentTree) -> R) -> Result<R> {
        Ok(f(&self.read()?.tree))
    }

    /// Exports the tree in nested form.
    pub fn modules(&self) -> Vec<Module> {
        self.with_tree(ContentTree::to_modules).unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Current breadcrumb path.
    pub fn path(&self) -> BreadcrumbPath {
        self.state.read().map(|s| s.path).unwrap_or_default()
    }

    /// Displayable breadcrumb trail for the current path.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        match self.state.read() {
            Ok(state) => state.path.segments(&state.tree),
            Err(_) => Vec::new(),
        }
    }

    /// Moves to `path`. Module and chapter paths also expand their module.
    pub fn navigate_to(&self, path: BreadcrumbPath) -> Result<()> {
        let mut state = self.write()?;
        state.validate(path)?;
        debug!(%path, "Navigating");
        state.set_path(path);
        Ok(())
    }

    /// Opens a chapter of a module.
    pub fn open_chapter(&self, module: ModuleId, chapter: ChapterId) -> Result<()> {
        self.navigate_to(BreadcrumbPath::Chapter(module, chapter))
    }

    /// Flips a module's expansion. Expanding also navigates into the
    /// module; collapsing leaves the path alone. Returns the new state.
    pub fn toggle_module(&self, id: ModuleId) -> Result<bool> {
        let mut state = self.write()?;
        if !state.tree.contains_module(id) {
            return Err(ContentError::not_found("module", id));
        }
        let was_expanded = state.expanded.get(&id).copied().unwrap_or(false);
        if was_expanded {
            state.expanded.insert(id, false);
        } else {
            state.set_path(BreadcrumbPath::Module(id));
        }
        debug!(module = %id, expanded = !was_expanded, "Module toggled");
        Ok(!was_expanded)
    }

    pub fn is_expanded(&self, id: ModuleId) -> bool {
        self.state
            .read()
            .map(|s| s.expanded.get(&id).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Listing and search
    // ------------------------------------------------------------------

    /// All documents at the current level, unfiltered.
    pub fn documents_in_view(&self) -> Vec<Document> {
        match self.state.read() {
            Ok(state) => state.documents_in_view(),
            Err(_) => Vec::new(),
        }
    }

    /// Documents at the current level matching `query` and `tab`.
    pub fn filter_documents(&self, query: &str, tab: TypeTab) -> Vec<Document> {
        DocumentFilter::new(query, tab).apply(self.documents_in_view())
    }

    /// Stores the search box text.
    pub fn set_search_query(&self, query: impl Into<String>) -> Result<()> {
        let mut state = self.write()?;
        let tab = state.search.tab();
        state.search = DocumentFilter::new(query, tab);
        Ok(())
    }

    /// Stores the selected type tab.
    pub fn set_active_tab(&self, tab: TypeTab) -> Result<()> {
        let mut state = self.write()?;
        let query = state.search.query().to_string();
        state.search = DocumentFilter::new(query, tab);
        Ok(())
    }

    /// Documents at the current level under the stored query and tab.
    pub fn visible_documents(&self) -> Vec<Document> {
        match self.state.read() {
            Ok(state) => state.search.apply(state.documents_in_view()),
            Err(_) => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------

    /// Shows a document in the preview panel and expands the panel.
    pub fn select_document(&self, id: DocumentId) -> Result<Document> {
        let mut state = self.write()?;
        let doc = state
            .tree
            .document(id)
            .ok_or_else(|| ContentError::not_found("document", id))?;
        state.selected = Some(id);
        state.results_minimized = false;
        Ok(doc)
    }

    /// Document currently in the preview panel.
    pub fn selected_document(&self) -> Option<Document> {
        let state = self.state.read().ok()?;
        let doc = state.selected.and_then(|id| state.tree.document(id));
        doc
    }

    pub fn clear_selection(&self) -> Result<()> {
        self.write()?.selected = None;
        Ok(())
    }

    /// Minimizes or restores the results panel. Returns true if now minimized.
    pub fn toggle_results_panel(&self) -> Result<bool> {
        let mut state = self.write()?;
        state.results_minimized = !state.results_minimized;
        Ok(state.results_minimized)
    }

    pub fn is_results_minimized(&self) -> bool {
        self.state.read().map(|s| s.results_minimized).unwrap_or(true)
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    pub fn create_module(&self, name: &str) -> Result<Module> {
        let module = {
            let mut state = self.write()?;
            let module = state.tree.create_module(name)?;
            state.expanded.insert(module.id, false);
            module
        };
        self.broadcast(ChangeKind::Created, EntityRef::Module(module.id), module.name.clone());
        Ok(module)
    }

    /// Renames a module. Returns false (no-op) if it does not exist.
    pub fn update_module(&self, id: ModuleId, name: &str) -> Result<bool> {
        let updated = self.write()?.tree.rename_module(id, name)?;
        if updated {
            self.broadcast(ChangeKind::Updated, EntityRef::Module(id), name.trim().to_string());
        }
        Ok(updated)
    }

    /// Deletes a module and everything under it. If the current path is
    /// inside the module, the browser returns to the root.
    pub fn delete_module(&self, id: ModuleId) -> Result<bool> {
        let name = {
            let mut state = self.write()?;
            let name = match state.tree.module_name(id) {
                Some(name) => name.to_string(),
                None => return Ok(false),
            };
            let Some(removed) = state.tree.delete_module(id) else {
                return Ok(false);
            };
            state.forget(&removed);
            state.expanded.remove(&id);
            if state.path.is_within_module(id) {
                state.path = BreadcrumbPath::Root;
            }
            name
        };
        self.broadcast(ChangeKind::Deleted, EntityRef::Module(id), name);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Chapters
    // ------------------------------------------------------------------

    pub fn create_chapter(&self, module: ModuleId, name: &str) -> Result<Chapter> {
        let chapter = self.write()?.tree.create_chapter(module, name)?;
        self.broadcast(ChangeKind::Created, EntityRef::Chapter(chapter.id), chapter.name.clone());
        Ok(chapter)
    }

    /// Renames a chapter of `module`. Returns false (no-op) if absent.
    pub fn update_chapter(&self, module: ModuleId, id: ChapterId, name: &str) -> Result<bool> {
        let updated = self.write()?.tree.rename_chapter(module, id, name)?;
        if updated {
            self.broadcast(ChangeKind::Updated, EntityRef::Chapter(id), name.trim().to_string());
        }
        Ok(updated)
    }

    /// Deletes a chapter and its documents. If the current path is inside
    /// the chapter, the browser moves up to the owning module.
    pub fn delete_chapter(&self, module: ModuleId, id: ChapterId) -> Result<bool> {
        let name = {
            let mut state = self.write()?;
            let name = match state.tree.chapter_name(id) {
                Some(name) => name.to_string(),
                None => return Ok(false),
            };
            let Some(removed) = state.tree.delete_chapter(module, id) else {
                return Ok(false);
            };
            state.forget(&removed);
            if state.path.is_within_chapter(id) {
                state.set_path(BreadcrumbPath::Module(module));
            }
            name
        };
        self.broadcast(ChangeKind::Deleted, EntityRef::Chapter(id), name);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    pub fn create_document(
        &self,
        module: ModuleId,
        chapter: ChapterId,
        draft: DocumentDraft,
    ) -> Result<Document> {
        let doc = self.write()?.tree.create_document(module, chapter, draft)?;
        self.broadcast(ChangeKind::Created, EntityRef::Document(doc.id), doc.title.clone());
        Ok(doc)
    }

    /// Edits a document of `module`/`chapter`. Returns false (no-op) if absent.
    pub fn update_document(
        &self,
        module: ModuleId,
        chapter: ChapterId,
        id: DocumentId,
        draft: DocumentDraft,
    ) -> Result<bool> {
        let title = draft.title.trim().to_string();
        let updated = self
            .write()?
            .tree
            .update_document(module, chapter, id, draft)?;
        if updated {
            self.broadcast(ChangeKind::Updated, EntityRef::Document(id), title);
        }
        Ok(updated)
    }

    /// Deletes a document, clearing the preview if it was showing it.
    pub fn delete_document(&self, module: ModuleId, chapter: ChapterId, id: DocumentId) -> Result<bool> {
        let title = {
            let mut state = self.write()?;
            let title = match state.tree.document(id) {
                Some(doc) => doc.title,
                None => return Ok(false),
            };
            if !state.tree.delete_document(module, chapter, id) {
                return Ok(false);
            }
            if state.selected == Some(id) {
                state.selected = None;
            }
            title
        };
        self.broadcast(ChangeKind::Deleted, EntityRef::Document(id), title);
        Ok(true)
    }
}

fn lock_error<T>(e: PoisonError<T>) -> ContentError {
    ContentError::LockPoisoned(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use spacehub_models::{DocumentFormat, DocumentType};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(11, 25, 10)
            .unwrap()
    }

    fn doc(id: u64, title: &str, doc_type: DocumentType) -> Document {
        Document {
            id: DocumentId::new(id),
            title: title.to_string(),
            doc_type,
            format: DocumentFormat::Pdf,
            created_at: ts(),
            link: "https://css4.pub/2015/textbook/somatosensory.pdf".to_string(),
        }
    }

    /// Module 1 "Product Demos" with chapters 1 (docs 1, 2) and 2 (docs 3, 4).
    fn product_demos() -> ContentBrowser {
        let tree = ContentTree::from_modules(vec![Module {
            id: ModuleId::new(1),
            name: "Product Demos".to_string(),
            created_at: ts(),
            duration: 2,
            chapters: vec![
                Chapter {
                    id: ChapterId::new(1),
                    name: "Software Demos".to_string(),
                    created_at: ts(),
                    documents: vec![
                        doc(1, "Introduction", DocumentType::Course),
                        doc(2, "Les Basics", DocumentType::Course),
                    ],
                },
                Chapter {
                    id: ChapterId::new(2),
                    name: "Hardware Demos".to_string(),
                    created_at: ts(),
                    documents: vec![
                        doc(3, "Introduction", DocumentType::Course),
                        doc(4, "Les Basics", DocumentType::Exercise),
                    ],
                },
            ],
        }])
        .unwrap();
        ContentBrowser::new(tree)
    }

    const M1: ModuleId = ModuleId::new(1);
    const C1: ChapterId = ChapterId::new(1);
    const C2: ChapterId = ChapterId::new(2);

    fn ids(docs: &[Document]) -> Vec<u64> {
        docs.iter().map(|d| d.id.get()).collect()
    }

    #[test]
    fn test_starts_at_root_collapsed() {
        let browser = product_demos();
        assert_eq!(browser.path(), BreadcrumbPath::Root);
        assert!(!browser.is_expanded(M1));
        assert!(browser.is_results_minimized());
        assert_eq!(ids(&browser.documents_in_view()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_view_by_level() {
        let browser = product_demos();

        browser.navigate_to(BreadcrumbPath::Module(M1)).unwrap();
        assert_eq!(browser.documents_in_view().len(), 4);

        browser.open_chapter(M1, C2).unwrap();
        assert_eq!(ids(&browser.documents_in_view()), vec![3, 4]);
        assert_eq!(browser.breadcrumbs().len(), 3);
    }

    #[test]
    fn test_module_level_exercise_tab() {
        let browser = product_demos();
        browser.navigate_to(BreadcrumbPath::Module(M1)).unwrap();

        let docs = browser.filter_documents("", TypeTab::Exercise);
        assert_eq!(ids(&docs), vec![4]);
    }

    #[test]
    fn test_chapter_level_query_and_tab() {
        let browser = product_demos();
        browser.open_chapter(M1, C1).unwrap();

        let docs = browser.filter_documents("intro", TypeTab::Course);
        assert_eq!(ids(&docs), vec![1]);
    }

    #[test]
    fn test_stored_search_state() {
        let browser = product_demos();
        browser.set_search_query("basics").unwrap();
        assert_eq!(ids(&browser.visible_documents()), vec![2, 4]);

        browser.set_active_tab(TypeTab::Course).unwrap();
        assert_eq!(ids(&browser.visible_documents()), vec![2]);

        browser.open_chapter(M1, C2).unwrap();
        assert!(browser.visible_documents().is_empty());
    }

    #[test]
    fn test_navigate_rejects_unknown_targets() {
        let browser = product_demos();
        assert!(matches!(
            browser.navigate_to(BreadcrumbPath::Module(ModuleId::new(7))),
            Err(ContentError::NotFound { kind: "module", .. })
        ));
        assert!(matches!(
            browser.open_chapter(M1, ChapterId::new(7)),
            Err(ContentError::NotFound { kind: "chapter", .. })
        ));
        assert_eq!(browser.path(), BreadcrumbPath::Root);
    }

    #[test]
    fn test_navigate_expands_module() {
        let browser = product_demos();
        browser.open_chapter(M1, C1).unwrap();
        assert!(browser.is_expanded(M1));
    }

    #[test]
    fn test_toggle_expand_navigates_collapse_does_not() {
        let browser = product_demos();

        assert!(browser.toggle_module(M1).unwrap());
        assert_eq!(browser.path(), BreadcrumbPath::Module(M1));

        browser.open_chapter(M1, C2).unwrap();
        assert!(!browser.toggle_module(M1).unwrap());
        assert!(!browser.is_expanded(M1));
        assert_eq!(browser.path(), BreadcrumbPath::Chapter(M1, C2));
    }

    #[test]
    fn test_delete_module_resets_path_to_root() {
        let browser = product_demos();
        browser.open_chapter(M1, C2).unwrap();

        assert!(browser.delete_module(M1).unwrap());
        assert_eq!(browser.path(), BreadcrumbPath::Root);
        assert!(!browser.is_expanded(M1));
        assert!(browser.documents_in_view().is_empty());
    }

    #[test]
    fn test_delete_other_module_keeps_path() {
        let browser = product_demos();
        let other = browser.create_module("Other").unwrap();
        browser.open_chapter(M1, C1).unwrap();

        browser.delete_module(other.id).unwrap();
        assert_eq!(browser.path(), BreadcrumbPath::Chapter(M1, C1));
    }

    #[test]
    fn test_delete_chapter_moves_path_to_module() {
        let browser = product_demos();
        browser.open_chapter(M1, C2).unwrap();

        assert!(browser.delete_chapter(M1, C2).unwrap());
        assert_eq!(browser.path(), BreadcrumbPath::Module(M1));
        assert_eq!(ids(&browser.documents_in_view()), vec![1, 2]);
    }

    #[test]
    fn test_delete_sibling_chapter_keeps_path() {
        let browser = product_demos();
        browser.open_chapter(M1, C2).unwrap();

        browser.delete_chapter(M1, C1).unwrap();
        assert_eq!(browser.path(), BreadcrumbPath::Chapter(M1, C2));
    }

    #[test]
    fn test_document_ids_global_across_chapters() {
        let browser = product_demos();
        let a = browser
            .create_document(M1, C1, DocumentDraft::new("A", DocumentType::Course))
            .unwrap();
        let b = browser
            .create_document(M1, C2, DocumentDraft::new("B", DocumentType::Exercise))
            .unwrap();
        let c = browser
            .create_document(M1, C1, DocumentDraft::new("C", DocumentType::Course))
            .unwrap();

        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(a.id, DocumentId::new(5));
    }

    #[test]
    fn test_select_document_expands_panel() {
        let browser = product_demos();
        let doc = browser.select_document(DocumentId::new(3)).unwrap();

        assert_eq!(doc.title, "Introduction");
        assert!(!browser.is_results_minimized());
        assert_eq!(browser.selected_document().unwrap().id, DocumentId::new(3));

        assert!(browser.toggle_results_panel().unwrap());
        assert!(matches!(
            browser.select_document(DocumentId::new(99)),
            Err(ContentError::NotFound { kind: "document", .. })
        ));
    }

    #[test]
    fn test_delete_selected_document_clears_selection() {
        let browser = product_demos();
        browser.select_document(DocumentId::new(2)).unwrap();

        assert!(browser.delete_document(M1, C1, DocumentId::new(2)).unwrap());
        assert!(browser.selected_document().is_none());
    }

    #[test]
    fn test_delete_other_document_keeps_selection() {
        let browser = product_demos();
        browser.select_document(DocumentId::new(2)).unwrap();

        browser.delete_document(M1, C1, DocumentId::new(1)).unwrap();
        assert_eq!(browser.selected_document().unwrap().id, DocumentId::new(2));
    }

    #[test]
    fn test_cascade_delete_clears_selection() {
        let browser = product_demos();
        browser.select_document(DocumentId::new(4)).unwrap();

        browser.delete_chapter(M1, C2).unwrap();
        assert!(browser.selected_document().is_none());
    }

    #[test]
    fn test_selection_reflects_edits() {
        let browser = product_demos();
        browser.select_document(DocumentId::new(1)).unwrap();
        browser
            .update_document(
                M1,
                C1,
                DocumentId::new(1),
                DocumentDraft::new("Welcome", DocumentType::Course),
            )
            .unwrap();

        assert_eq!(browser.selected_document().unwrap().title, "Welcome");
    }

    #[test]
    fn test_missing_targets_are_noops() {
        let browser = product_demos();
        let ghost_module = ModuleId::new(42);

        assert!(!browser.update_module(ghost_module, "Ghost").unwrap());
        assert!(!browser.delete_module(ghost_module).unwrap());
        assert!(!browser.update_chapter(M1, ChapterId::new(42), "Ghost").unwrap());
        assert!(!browser.delete_chapter(M1, ChapterId::new(42)).unwrap());
        assert!(!browser
            .update_document(M1, C1, DocumentId::new(42), DocumentDraft::new("G", DocumentType::Course))
            .unwrap());
        assert!(!browser.delete_document(M1, C1, DocumentId::new(42)).unwrap());

        // second delete of the same document
        assert!(browser.delete_document(M1, C1, DocumentId::new(1)).unwrap());
        assert!(!browser.delete_document(M1, C1, DocumentId::new(1)).unwrap());
        assert_eq!(browser.documents_in_view().len(), 3);
    }

    #[test]
    fn test_update_module_changes_only_name() {
        let browser = product_demos();
        browser.update_module(M1, "Demos").unwrap();

        let module = browser.with_tree(|t| t.module(M1)).unwrap().unwrap();
        assert_eq!(module.name, "Demos");
        assert_eq!(module.duration, 2);
        assert_eq!(module.chapters.len(), 2);
    }

    #[test]
    fn test_notices_broadcast() {
        let browser = product_demos();
        let rx = browser.subscribe();

        let module = browser.create_module("Onboarding").unwrap();
        browser.delete_module(module.id).unwrap();

        let created = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(created.title(), "Module created");
        assert_eq!(created.to_string(), "Onboarding has been created successfully.");

        let deleted = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(deleted.change, ChangeKind::Deleted);
        assert_eq!(deleted.entity, EntityRef::Module(module.id));
    }

    #[test]
    fn test_failed_mutations_do_not_notify() {
        let browser = product_demos();
        let rx = browser.subscribe();

        assert!(browser.create_module("").is_err());
        browser.delete_module(ModuleId::new(42)).unwrap();

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_thread_safe_chapter_creation() {
        let browser = Arc::new(product_demos());
        let mut handles = vec![];

        for i in 0..8 {
            let b = browser.clone();
            handles.push(thread::spawn(move || {
                b.create_chapter(M1, &format!("Chapter {}", i)).unwrap().id
            }));
        }

        let mut ids: Vec<ChapterId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(ids.first(), Some(&ChapterId::new(3)));
        assert_eq!(ids.last(), Some(&ChapterId::new(10)));
    }
}
