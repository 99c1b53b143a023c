//! In-memory directory tree rebuilt from a terminal transcript.
//!
//! Every node lives in a single arena owned by [`FilesystemTree`] and is
//! addressed by an [`EntryId`]. Directories own their children top-down;
//! the parent link of an entry is only an id used to walk back up.

mod entry;
mod tree;

pub use entry::{Entry, EntryId, EntryKind};
pub use tree::{FilesystemTree, SizeOverflowError};
