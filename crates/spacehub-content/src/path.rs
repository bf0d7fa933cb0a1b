//! Breadcrumb navigation paths.
//!
//! A path has exactly three shapes: the root ("All Content"), a module,
//! or a chapter inside a module.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use spacehub_models::{ChapterId, ModuleId};

use crate::error::ContentError;
use crate::tree::ContentTree;

pub const ROOT_KEY: &str = "all-content";
pub const ROOT_NAME: &str = "All Content";

/// Where the browser is currently pointed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BreadcrumbPath {
    #[default]
    Root,
    Module(ModuleId),
    Chapter(ModuleId, ChapterId),
}

impl BreadcrumbPath {
    /// Segments after the root: 0, 1 or 2.
    pub fn depth(&self) -> usize {
        match self {
            BreadcrumbPath::Root => 0,
            BreadcrumbPath::Module(_) => 1,
            BreadcrumbPath::Chapter(_, _) => 2,
        }
    }

    pub fn module(&self) -> Option<ModuleId> {
        match self {
            BreadcrumbPath::Root => None,
            BreadcrumbPath::Module(m) | BreadcrumbPath::Chapter(m, _) => Some(*m),
        }
    }

    pub fn chapter(&self) -> Option<ChapterId> {
        match self {
            BreadcrumbPath::Chapter(_, c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true if the path is at or below `module`.
    pub fn is_within_module(&self, module: ModuleId) -> bool {
        self.module() == Some(module)
    }

    /// Returns true if the path points at `chapter`.
    pub fn is_within_chapter(&self, chapter: ChapterId) -> bool {
        self.chapter() == Some(chapter)
    }

    /// One level up; the root is its own parent.
    pub fn parent(&self) -> BreadcrumbPath {
        match self {
            BreadcrumbPath::Root | BreadcrumbPath::Module(_) => BreadcrumbPath::Root,
            BreadcrumbPath::Chapter(m, _) => BreadcrumbPath::Module(*m),
        }
    }

    pub fn href(&self) -> String {
        match self {
            BreadcrumbPath::Root => "/".to_string(),
            BreadcrumbPath::Module(m) => format!("/module/{}", m.get()),
            BreadcrumbPath::Chapter(m, c) => format!("/module/{}/chapter/{}", m.get(), c.get()),
        }
    }

    /// Builds the displayable breadcrumb trail, naming each level from
    /// the tree. Missing entities fall back to their key.
    pub fn segments(&self, tree: &ContentTree) -> Vec<Breadcrumb> {
        let mut items = vec![Breadcrumb {
            id: ROOT_KEY.to_string(),
            name: ROOT_NAME.to_string(),
            href: BreadcrumbPath::Root.href(),
        }];

        if let Some(m) = self.module() {
            items.push(Breadcrumb {
                id: m.key(),
                name: tree.module_name(m).map_or_else(|| m.key(), str::to_string),
                href: BreadcrumbPath::Module(m).href(),
            });
        }
        if let BreadcrumbPath::Chapter(m, c) = *self {
            items.push(Breadcrumb {
                id: c.key(),
                name: tree.chapter_name(c).map_or_else(|| c.key(), str::to_string),
                href: BreadcrumbPath::Chapter(m, c).href(),
            });
        }
        items
    }

    /// Parses breadcrumb keys such as `["all-content", "module-1", "chapter-2"]`.
    /// The leading root key is optional.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, ContentError> {
        let mut keys: Vec<&str> = keys.iter().map(|k| k.as_ref()).collect();
        if keys.first() == Some(&ROOT_KEY) {
            keys.remove(0);
        }
        match keys.as_slice() {
            [] => Ok(BreadcrumbPath::Root),
            [m] => Ok(BreadcrumbPath::Module(ModuleId::new(parse_key(m, "module")?))),
            [m, c] => Ok(BreadcrumbPath::Chapter(
                ModuleId::new(parse_key(m, "module")?),
                ChapterId::new(parse_key(c, "chapter")?),
            )),
            _ => Err(ContentError::InvalidPath(keys.join("/"))),
        }
    }
}

fn parse_key(key: &str, prefix: &str) -> Result<u64, ContentError> {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ContentError::InvalidPath(key.to_string()))
}

impl fmt::Display for BreadcrumbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl FromStr for BreadcrumbPath {
    type Err = ContentError;

    /// Parses hrefs: `/`, `/module/1`, `/module/1/chapter/2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').filter(|p| !p.is_empty()).collect();
        let num = |v: &str| -> Result<u64, ContentError> {
            v.parse().map_err(|_| ContentError::InvalidPath(s.to_string()))
        };
        match parts.as_slice() {
            [] => Ok(BreadcrumbPath::Root),
            ["module", m] => Ok(BreadcrumbPath::Module(ModuleId::new(num(*m)?))),
            ["module", m, "chapter", c] => Ok(BreadcrumbPath::Chapter(
                ModuleId::new(num(*m)?),
                ChapterId::new(num(*c)?),
            )),
            _ => Err(ContentError::InvalidPath(s.to_string())),
        }
    }
}

/// One displayable breadcrumb item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub id: String,
    pub name: String,
    pub href: String,
}
