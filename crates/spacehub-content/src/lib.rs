//! Module/chapter/document content browsing for SpaceHub.
//!
//! The `ContentBrowser` wraps a `ContentTree` with the view state a
//! learner navigates through: a breadcrumb path, per-module expansion,
//! search over the current level and a document preview.

pub mod browser;
pub mod error;
pub mod filter;
pub mod path;
pub mod tree;

pub use browser::{ChangeKind, ContentBrowser, ContentNotice, EntityRef};
pub use error::{ContentError, Result};
pub use filter::{DocumentFilter, TypeTab};
pub use path::{Breadcrumb, BreadcrumbPath, ROOT_KEY, ROOT_NAME};
pub use tree::{ContentTree, IdSequence, Removed};
