//! Core data models for SpaceHub.
//!
//! This crate provides the serializable data types shared by the event
//! scheduler and the content browser: calendar events, the
//! module/chapter/document content shapes, and their identifiers.

pub mod builders;
pub mod content;
pub mod event;
pub mod ids;

// Re-export main types
pub use builders::EventBuilder;
pub use content::{
    Chapter, Document, DocumentDraft, DocumentFormat, DocumentType, Module, DEFAULT_DOCUMENT_LINK,
};
pub use event::{
    Event, EventStatus, Instructor, NewEvent, UnknownStatus, ALL_STATUSES, DEFAULT_EVENT_COLOR,
};
pub use ids::{ChapterId, DocumentId, EventId, ModuleId};
