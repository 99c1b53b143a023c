use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::{EntryId, FilesystemTree, SizeOverflowError};

/// Directories at or below this size count towards the small-directory sum
pub const DEFAULT_SMALL_LIMIT: u64 = 100_000;
/// Capacity of the device the transcript was taken from
pub const DEFAULT_DISK_SIZE: u64 = 70_000_000;
/// Free space needed before an update can run
pub const DEFAULT_REQUIRED_SPACE: u64 = 30_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportThresholds {
    pub small_limit: u64,
    pub disk_size: u64,
    pub required_space: u64,
}

impl Default for ReportThresholds {
    fn default() -> Self {
        Self {
            small_limit: DEFAULT_SMALL_LIMIT,
            disk_size: DEFAULT_DISK_SIZE,
            required_space: DEFAULT_REQUIRED_SPACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySize {
    pub id: EntryId,
    pub path: String,
    pub size: u64,
}

/// Effective size of every directory in a tree, root first
#[derive(Debug, Clone)]
pub struct SizeReport {
    directories: Vec<DirectorySize>,
    used_space: u64,
}

impl SizeReport {
    pub fn from_tree(tree: &FilesystemTree) -> Result<Self, ReportError> {
        let sizes = tree.directory_sizes().context(DirectorySizeSnafu)?;
        let directories = tree
            .descendants(tree.root())
            .into_iter()
            .filter_map(|id| {
                sizes.get(&id).map(|size| DirectorySize {
                    id,
                    path: tree.path(id),
                    size: *size,
                })
            })
            .collect::<Vec<_>>();
        let used_space = sizes.get(&tree.root()).copied().unwrap_or(0);

        debug!(
            "Computed sizes for {} directories, {} bytes used",
            directories.len(),
            used_space
        );
        Ok(SizeReport {
            directories,
            used_space,
        })
    }

    pub fn directories(&self) -> &[DirectorySize] {
        &self.directories
    }

    pub fn used_space(&self) -> u64 {
        self.used_space
    }

    pub fn size_of(&self, path: &str) -> Option<u64> {
        self.directories
            .iter()
            .find(|dir| dir.path == path)
            .map(|dir| dir.size)
    }

    /// Sum of the sizes of every directory no larger than `limit`. Nested
    /// directories are counted once for themselves and again inside their
    /// ancestors.
    pub fn sum_at_most(&self, limit: u64) -> Result<u64, ReportError> {
        self.directories
            .iter()
            .map(|dir| dir.size)
            .filter(|size| *size <= limit)
            .try_fold(0u64, |total, size| total.checked_add(size))
            .context(SumOverflowSnafu { limit })
    }

    /// Smallest directory whose removal leaves at least `required` bytes free
    /// on a disk of `disk_size` bytes.
    ///
    /// Returns `None` when enough space is already free or when no single
    /// directory is large enough.
    pub fn smallest_to_free(&self, disk_size: u64, required: u64) -> Option<&DirectorySize> {
        let free = disk_size.saturating_sub(self.used_space);
        let missing = required.checked_sub(free).filter(|missing| *missing > 0)?;
        debug!("Need to free {missing} more bytes");

        self.directories
            .iter()
            .filter(|dir| dir.size >= missing)
            .min_by_key(|dir| dir.size)
    }
}

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Failed to compute directory sizes"))]
    DirectorySizeError { source: SizeOverflowError },
    #[snafu(display("Sum of directories of at most {} bytes does not fit in 64 bits", limit))]
    SumOverflow { limit: u64 },
}
