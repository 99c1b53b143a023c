use std::fmt::{Display, Formatter};

use derive_more::Display as DisplayDerive;
use hashlink::LinkedHashMap;

/// Identifier of an entry inside one [`FilesystemTree`](super::FilesystemTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, DisplayDerive)]
#[display("#{_0}")]
pub struct EntryId(pub(super) usize);

/// Represents the type of a filesystem entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File {
        size: u64,
    },
    Directory {
        children: LinkedHashMap<String, EntryId>,
    },
}

/// A single named node of the tree, either a file or a directory
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    kind: EntryKind,
    parent: Option<EntryId>,
}

impl Entry {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File { size },
            parent: None,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory {
                children: LinkedHashMap::new(),
            },
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Directory this entry was attached to, `None` for the root or a detached entry
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    /// Size recorded for the entry itself. Directories report 0, their
    /// effective size is computed by the tree.
    pub fn size(&self) -> u64 {
        match self.kind {
            EntryKind::File { size } => size,
            EntryKind::Directory { .. } => 0,
        }
    }

    pub fn child(&self, name: &str) -> Option<EntryId> {
        match &self.kind {
            EntryKind::Directory { children } => children.get(name).copied(),
            EntryKind::File { .. } => None,
        }
    }

    /// Children in listing order. Always empty for files.
    pub fn children(&self) -> impl Iterator<Item = (&str, EntryId)> {
        let children = match &self.kind {
            EntryKind::Directory { children } => Some(children),
            EntryKind::File { .. } => None,
        };
        children
            .into_iter()
            .flat_map(|children| children.iter().map(|(name, id)| (name.as_str(), *id)))
    }

    pub fn child_count(&self) -> usize {
        match &self.kind {
            EntryKind::Directory { children } => children.len(),
            EntryKind::File { .. } => 0,
        }
    }

    pub(super) fn set_parent(&mut self, parent: EntryId) {
        self.parent = Some(parent);
    }

    /// Registers `child` under `name`. Returns the id previously stored under
    /// that name, if any. Files silently keep no children.
    pub(super) fn insert_child(&mut self, name: String, child: EntryId) -> Option<EntryId> {
        match &mut self.kind {
            EntryKind::Directory { children } => children.insert(name, child),
            EntryKind::File { .. } => None,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EntryKind::File { size } => write!(f, "{} (file, size={})", self.name, size),
            EntryKind::Directory { .. } => write!(f, "{} (dir)", self.name),
        }
    }
}
