//! Tracking of the files picked so far.

use std::path::{Path, PathBuf};

/// Ordered set of absolute paths chosen by the user.
///
/// Insertion order is preserved so the final output lists files in the order they were picked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileSelection {
    items: Vec<PathBuf>,
}

impl FileSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of selected files.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Access the selected paths in pick order.
    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.items.iter().any(|item| item == path)
    }

    /// Add a path. Returns `false` when it was already selected.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.items.push(path);
        true
    }

    /// Remove a path. Returns `true` when it was selected.
    pub fn remove(&mut self, path: &Path) -> bool {
        let original_len = self.items.len();
        self.items.retain(|item| item != path);
        self.items.len() != original_len
    }

    /// Remove all selections.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.items
    }
}

impl FromIterator<PathBuf> for FileSelection {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        let mut selection = Self::new();
        for path in iter {
            selection.add(path);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_pick_order_and_ignores_duplicates() {
        let mut selection = FileSelection::new();
        assert!(selection.add("/repo/b.rs"));
        assert!(selection.add("/repo/a.rs"));
        assert!(!selection.add("/repo/b.rs"));

        assert_eq!(selection.len(), 2);
        assert_eq!(
            selection.items(),
            &[PathBuf::from("/repo/b.rs"), PathBuf::from("/repo/a.rs")]
        );
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut selection: FileSelection = [PathBuf::from("/repo/a.rs")].into_iter().collect();
        assert!(!selection.remove(Path::new("/repo/missing.rs")));
        assert!(selection.remove(Path::new("/repo/a.rs")));
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_empties_selection() {
        let mut selection: FileSelection = ["/a", "/b", "/a"].into_iter().map(PathBuf::from).collect();
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.into_paths().is_empty());
    }
}
