use std::collections::HashMap;
use std::ops::Index;

use snafu::prelude::*;
use tracing::debug;

use super::{Entry, EntryId, EntryKind};

const ROOT_NAME: &str = "/";

/// Arena of entries rooted at a single `/` directory.
///
/// Entries are only ever appended. When a name is listed twice under the same
/// directory the later entry replaces the earlier one in the children map and
/// the earlier subtree becomes unreachable; traversals only visit reachable
/// entries.
#[derive(Debug, Clone)]
pub struct FilesystemTree {
    entries: Vec<Entry>,
}

impl FilesystemTree {
    pub fn new() -> Self {
        FilesystemTree {
            entries: vec![Entry::directory(ROOT_NAME)],
        }
    }

    pub fn root(&self) -> EntryId {
        EntryId(0)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    /// Number of entries stored in the arena, including unreachable ones
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Attaches `entry` to the directory `parent` and returns the id of the new
    /// entry.
    ///
    /// Adding to a file (or to an id this tree never handed out) is a no-op
    /// and returns `None`.
    pub fn add_child(&mut self, parent: EntryId, mut entry: Entry) -> Option<EntryId> {
        if !self.get(parent).is_some_and(Entry::is_dir) {
            debug!("Ignoring '{}' added to non-directory {}", entry.name(), parent);
            return None;
        }

        let id = EntryId(self.entries.len());
        entry.set_parent(parent);
        let name = entry.name().to_string();
        self.entries.push(entry);

        if let Some(replaced) = self.entries[parent.0].insert_child(name, id) {
            debug!("Entry {} replaced {} under {}", id, replaced, parent);
        }

        Some(id)
    }

    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).and_then(Entry::parent)
    }

    pub fn child(&self, id: EntryId, name: &str) -> Option<EntryId> {
        self.get(id).and_then(|entry| entry.child(name))
    }

    /// Pre-order walk of `id` and everything reachable below it
    pub fn descendants(&self, id: EntryId) -> Vec<EntryId> {
        self.descendants_with_depth(id)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// Same walk as [`descendants`](Self::descendants), paired with the depth
    /// of each entry below `id`
    pub fn descendants_with_depth(&self, id: EntryId) -> Vec<(EntryId, usize)> {
        let mut visited = Vec::new();
        let mut stack = Vec::new();
        if self.get(id).is_some() {
            stack.push((id, 0));
        }

        while let Some((current, depth)) = stack.pop() {
            visited.push((current, depth));
            let children = self[current].children().map(|(_, child)| (child, depth + 1));
            // Reversed so children come out in listing order
            stack.extend(children.collect::<Vec<_>>().into_iter().rev());
        }

        visited
    }

    /// Absolute path of an entry, e.g. `/a/e`
    pub fn path(&self, id: EntryId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(entry) = current.and_then(|id| self.get(id)) {
            if entry.parent().is_none() {
                break;
            }
            names.push(entry.name());
            current = entry.parent();
        }

        if names.is_empty() {
            return ROOT_NAME.to_string();
        }

        names
            .iter()
            .rev()
            .fold(String::new(), |mut path, name| {
                path.push('/');
                path.push_str(name);
                path
            })
    }

    /// Size of a file, or the summed size of every file below a directory
    pub fn total_size(&self, id: EntryId) -> Result<u64, SizeOverflowError> {
        self.descendants(id)
            .into_iter()
            .try_fold(0u64, |total, descendant| {
                total
                    .checked_add(self[descendant].size())
                    .with_context(|| SizeOverflowSnafu { path: self.path(id) })
            })
    }

    /// Effective sizes of every reachable directory, computed bottom-up in a
    /// single pass.
    pub fn directory_sizes(&self) -> Result<HashMap<EntryId, u64>, SizeOverflowError> {
        let mut sizes = HashMap::new();
        for id in self.descendants(self.root()).into_iter().rev() {
            let entry = &self[id];
            if !entry.is_dir() {
                continue;
            }
            let size = entry.children().try_fold(0u64, |total, (_, child)| {
                let child_size = match self[child].kind() {
                    EntryKind::File { size } => *size,
                    EntryKind::Directory { .. } => sizes.get(&child).copied().unwrap_or(0),
                };
                total
                    .checked_add(child_size)
                    .with_context(|| SizeOverflowSnafu { path: self.path(id) })
            })?;
            sizes.insert(id, size);
        }
        Ok(sizes)
    }

    /// Indented dump of the whole tree, one entry per line
    pub fn layout(&self) -> String {
        self.layout_with(|entry| entry.to_string())
    }

    /// Indented dump using `label` to render each entry
    pub fn layout_with(&self, label: impl Fn(&Entry) -> String) -> String {
        self.descendants_with_depth(self.root())
            .into_iter()
            .fold(String::new(), |mut out, (id, depth)| {
                out.push_str(&"  ".repeat(depth));
                out.push_str("- ");
                out.push_str(&label(&self[id]));
                out.push('\n');
                out
            })
    }

    fn structure_eq(&self, other: &FilesystemTree) -> bool {
        let mut pending = vec![(self.root(), other.root())];

        while let Some((id, other_id)) = pending.pop() {
            let (this, that) = (&self[id], &other[other_id]);
            if this.name() != that.name() {
                return false;
            }

            match (this.kind(), that.kind()) {
                (EntryKind::File { size: a }, EntryKind::File { size: b }) => {
                    if a != b {
                        return false;
                    }
                }
                (EntryKind::Directory { children: a }, EntryKind::Directory { children: b }) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    for (name, child) in a {
                        match b.get(name) {
                            Some(other_child) => pending.push((*child, *other_child)),
                            None => return false,
                        }
                    }
                }
                _ => return false,
            }
        }

        true
    }
}

impl Default for FilesystemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<EntryId> for FilesystemTree {
    type Output = Entry;

    fn index(&self, id: EntryId) -> &Self::Output {
        &self.entries[id.0]
    }
}

/// Two trees are equal when their reachable structure matches: same names,
/// kinds and file sizes. Ids and listing order are ignored.
impl PartialEq for FilesystemTree {
    fn eq(&self, other: &Self) -> bool {
        self.structure_eq(other)
    }
}

impl Eq for FilesystemTree {}

#[derive(Debug, Snafu)]
#[snafu(display("Total size of '{}' does not fit in 64 bits", path))]
pub struct SizeOverflowError {
    path: String,
}

impl SizeOverflowError {
    /// Directory whose total overflowed
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FilesystemTree {
        let mut tree = FilesystemTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Entry::directory("a")).unwrap();
        tree.add_child(root, Entry::file("b.txt", 14848514)).unwrap();
        tree.add_child(root, Entry::file("c.dat", 8504156)).unwrap();
        let e = tree.add_child(a, Entry::directory("e")).unwrap();
        tree.add_child(e, Entry::file("i", 584)).unwrap();
        tree.add_child(a, Entry::file("f", 29116)).unwrap();
        tree.add_child(a, Entry::file("g", 2557)).unwrap();
        tree
    }

    #[test]
    fn test_new_tree_has_root_directory() {
        let tree = FilesystemTree::new();
        let root = &tree[tree.root()];

        assert_eq!(root.name(), "/");
        assert!(root.is_dir());
        assert_eq!(root.parent(), None);
        assert_eq!(tree.entry_count(), 1);
    }

    #[test]
    fn test_add_child_sets_parent() {
        let mut tree = FilesystemTree::new();
        let root = tree.root();

        let a = tree.add_child(root, Entry::directory("a")).unwrap();

        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.child(root, "a"), Some(a));
    }

    #[test]
    fn test_add_child_to_file_is_noop() {
        let mut tree = FilesystemTree::new();
        let root = tree.root();
        let file = tree.add_child(root, Entry::file("b.txt", 10)).unwrap();
        let len_before = tree.entry_count();

        let result = tree.add_child(file, Entry::file("nested", 1));

        assert_eq!(result, None);
        assert_eq!(tree.entry_count(), len_before);
        assert_eq!(tree[file].child_count(), 0);
    }

    #[test]
    fn test_add_child_to_unknown_id_is_noop() {
        let mut tree = FilesystemTree::new();

        assert_eq!(tree.add_child(EntryId(42), Entry::directory("x")), None);
        assert_eq!(tree.entry_count(), 1);
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut tree = FilesystemTree::new();
        let root = tree.root();
        let old = tree.add_child(root, Entry::directory("x")).unwrap();
        tree.add_child(old, Entry::file("inner", 5)).unwrap();

        let new = tree.add_child(root, Entry::file("x", 9)).unwrap();

        assert_eq!(tree.child(root, "x"), Some(new));
        assert_eq!(tree[root].child_count(), 1);
        assert_eq!(tree.total_size(root).unwrap(), 9);
        assert!(!tree.descendants(root).contains(&old));
    }

    #[test]
    fn test_parent_child_consistency() {
        let tree = sample_tree();

        for id in tree.descendants(tree.root()) {
            if let Some(parent) = tree.parent(id) {
                assert_eq!(tree.child(parent, tree[id].name()), Some(id));
            } else {
                assert_eq!(id, tree.root());
            }
        }
    }

    #[test]
    fn test_descendants_in_listing_order() {
        let tree = sample_tree();

        let names: Vec<_> = tree
            .descendants(tree.root())
            .into_iter()
            .map(|id| tree[id].name().to_string())
            .collect();

        assert_eq!(names, vec!["/", "a", "e", "i", "f", "g", "b.txt", "c.dat"]);
    }

    #[test]
    fn test_path() {
        let tree = sample_tree();
        let root = tree.root();
        let a = tree.child(root, "a").unwrap();
        let e = tree.child(a, "e").unwrap();
        let i = tree.child(e, "i").unwrap();

        assert_eq!(tree.path(root), "/");
        assert_eq!(tree.path(a), "/a");
        assert_eq!(tree.path(i), "/a/e/i");
    }

    #[test]
    fn test_total_size() {
        let tree = sample_tree();
        let root = tree.root();
        let a = tree.child(root, "a").unwrap();
        let e = tree.child(a, "e").unwrap();
        let b = tree.child(root, "b.txt").unwrap();

        assert_eq!(tree.total_size(e).unwrap(), 584);
        assert_eq!(tree.total_size(a).unwrap(), 584 + 29116 + 2557);
        assert_eq!(tree.total_size(b).unwrap(), 14848514);
        assert_eq!(
            tree.total_size(root).unwrap(),
            584 + 29116 + 2557 + 14848514 + 8504156
        );
    }

    #[test]
    fn test_directory_sizes_match_total_size() {
        let tree = sample_tree();

        let sizes = tree.directory_sizes().unwrap();

        assert_eq!(sizes.len(), 3);
        for (id, size) in sizes {
            assert_eq!(size, tree.total_size(id).unwrap());
        }
    }

    #[test]
    fn test_layout() {
        let tree = sample_tree();

        let expected = "\
- / (dir)
  - a (dir)
    - e (dir)
      - i (file, size=584)
    - f (file, size=29116)
    - g (file, size=2557)
  - b.txt (file, size=14848514)
  - c.dat (file, size=8504156)
";
        assert_eq!(tree.layout(), expected);
    }

    #[test]
    fn test_structural_equality_ignores_order() {
        let mut other = FilesystemTree::new();
        let root = other.root();
        other.add_child(root, Entry::file("c.dat", 8504156)).unwrap();
        other.add_child(root, Entry::file("b.txt", 14848514)).unwrap();
        let a = other.add_child(root, Entry::directory("a")).unwrap();
        other.add_child(a, Entry::file("g", 2557)).unwrap();
        other.add_child(a, Entry::file("f", 29116)).unwrap();
        let e = other.add_child(a, Entry::directory("e")).unwrap();
        other.add_child(e, Entry::file("i", 584)).unwrap();

        assert_eq!(sample_tree(), other);
    }

    #[test]
    fn test_structural_inequality() {
        let mut other = sample_tree();
        let root = other.root();
        let a = other.child(root, "a").unwrap();
        other.add_child(a, Entry::file("g", 1)).unwrap();

        assert_ne!(sample_tree(), other);
        assert_ne!(sample_tree(), FilesystemTree::new());
    }

    fn overflowing_tree() -> FilesystemTree {
        let mut tree = FilesystemTree::new();
        let root = tree.root();
        let big = tree.add_child(root, Entry::directory("big")).unwrap();
        tree.add_child(big, Entry::file("a", u64::MAX)).unwrap();
        tree.add_child(big, Entry::file("b", 1)).unwrap();
        tree
    }

    #[test]
    fn test_total_size_overflow_is_an_error() {
        let tree = overflowing_tree();
        let big = tree.child(tree.root(), "big").unwrap();

        let error = tree.total_size(big).unwrap_err();

        assert_eq!(error.path(), "/big");
    }

    #[test]
    fn test_directory_sizes_overflow_is_an_error() {
        let tree = overflowing_tree();

        let error = tree.directory_sizes().unwrap_err();

        assert_eq!(error.path(), "/big");
        assert!(error.to_string().contains("does not fit"));
    }

    #[test]
    fn test_sizes_up_to_the_limit_are_fine() {
        let mut tree = FilesystemTree::new();
        let root = tree.root();
        tree.add_child(root, Entry::file("a", u64::MAX - 1)).unwrap();
        tree.add_child(root, Entry::file("b", 1)).unwrap();

        assert_eq!(tree.total_size(root).unwrap(), u64::MAX);
        assert_eq!(tree.directory_sizes().unwrap()[&root], u64::MAX);
    }

    #[test]
    fn test_descendants_with_depth() {
        let tree = sample_tree();

        let depths: Vec<_> = tree
            .descendants_with_depth(tree.root())
            .into_iter()
            .map(|(id, depth)| (tree[id].name().to_string(), depth))
            .collect();

        assert_eq!(depths[0], ("/".to_string(), 0));
        assert_eq!(depths[2], ("e".to_string(), 2));
        assert_eq!(depths[3], ("i".to_string(), 3));
        assert_eq!(depths[7], ("c.dat".to_string(), 1));
    }

    #[test]
    fn test_layout_with_custom_label() {
        let tree = sample_tree();

        let layout = tree.layout_with(|entry| entry.name().to_uppercase());

        assert!(layout.starts_with("- /\n  - A\n    - E\n      - I\n"));
    }

    #[test]
    fn test_deeply_nested_tree() {
        let mut tree = FilesystemTree::new();
        let mut current = tree.root();
        for depth in 0..100_000 {
            current = tree
                .add_child(current, Entry::directory(format!("d{depth}")))
                .unwrap();
        }
        tree.add_child(current, Entry::file("leaf", 7)).unwrap();
        let copy = tree.clone();

        assert_eq!(tree, copy);
        assert_eq!(tree.descendants_with_depth(tree.root()).len(), 100_002);
        assert_eq!(tree.total_size(tree.root()).unwrap(), 7);
    }
}
