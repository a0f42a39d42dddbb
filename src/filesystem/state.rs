//! Module `filesystem`
//!
//! Defines the `FileSystem` session: the owned tree plus the current
//! working position inside it.

use log::warn;

use crate::navigate::path;
use crate::node::Folder;

/// The namespace session.
///
/// The current folder is never stored as a reference; it is recomputed by
/// walking `current_path` from `root`, so structural mutations can never
/// leave a dangling position behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystem {
    root: Folder,
    current_path: String,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self {
            root: Folder::root(),
            current_path: path::ROOT.to_string(),
        }
    }
}

impl FileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session from a loaded tree and a saved path.
    ///
    /// Falls back to `/` when the path no longer resolves to a folder. A
    /// restored position never sits inside a protected folder: the path is
    /// cut back to the deepest ancestor with no password on the way, so the
    /// guard runs again on the next access. Returns the session and whether
    /// the saved path was not restored as is.
    pub fn from_parts(mut root: Folder, current_path: &str) -> (Self, bool) {
        root.name = path::ROOT.to_string();
        root.password = None;

        let (kept, fell_back) = match path::absolute_segments(current_path) {
            Some(segments) => Self::restorable(&root, segments, current_path),
            None => (Vec::new(), true),
        };

        (
            Self {
                root,
                current_path: path::join(&kept),
            },
            fell_back,
        )
    }

    fn restorable(root: &Folder, segments: Vec<String>, saved: &str) -> (Vec<String>, bool) {
        let mut kept = Vec::with_capacity(segments.len());
        let mut current = root;
        for segment in segments {
            match current.folder(&segment) {
                Some(child) if child.password.is_none() => {
                    current = child;
                    kept.push(segment);
                }
                Some(_) => {
                    warn!(
                        "Saved path {} enters protected folder {}; restoring {}",
                        saved,
                        path::child(&kept, &segment),
                        path::join(&kept)
                    );
                    return (kept, true);
                }
                None => return (Vec::new(), true),
            }
        }
        (kept, false)
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn root(&self) -> &Folder {
        &self.root
    }

    /// Returns the canonical absolute path of the current folder.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Returns the segments of the current path, root first.
    pub fn current_segments(&self) -> Vec<String> {
        path::absolute_segments(&self.current_path).unwrap_or_default()
    }

    /// Returns the current folder.
    pub fn current_folder(&self) -> &Folder {
        self.folder_at(&self.current_segments())
            .unwrap_or(&self.root)
    }

    /// Walks `segments` from root; every segment must be a folder.
    pub fn folder_at(&self, segments: &[String]) -> Option<&Folder> {
        Self::walk(&self.root, segments)
    }

    pub(crate) fn folder_at_mut(&mut self, segments: &[String]) -> Option<&mut Folder> {
        let mut current = &mut self.root;
        for segment in segments {
            current = current.folder_mut(segment)?;
        }
        Some(current)
    }

    fn walk<'a>(root: &'a Folder, segments: &[String]) -> Option<&'a Folder> {
        let mut current = root;
        for segment in segments {
            current = current.folder(segment)?;
        }
        Some(current)
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Sets the current position. Callers must have resolved `segments`
    /// against this tree.
    pub(crate) fn set_current_segments(&mut self, segments: &[String]) {
        self.current_path = path::join(segments);
    }

    /// Rewrites the current path after the folder at `old` moved to `new`.
    pub(crate) fn rebase_current(&mut self, old: &[String], new: &[String]) {
        let current = self.current_segments();
        if current.starts_with(old) {
            let mut rebased = new.to_vec();
            rebased.extend_from_slice(&current[old.len()..]);
            self.current_path = path::join(&rebased);
        }
    }

    /// Moves the current position to `fallback` if it lies inside `removed`.
    pub(crate) fn evict_current(&mut self, removed: &[String], fallback: &[String]) {
        if self.current_segments().starts_with(removed) {
            self.current_path = path::join(fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn tree() -> Folder {
        let mut b = Folder::new("b");
        b.contents_mut().insert("c".into(), Node::from(Folder::new("c")));
        let mut a = Folder::new("a");
        a.contents_mut().insert("b".into(), Node::from(b));
        let mut root = Folder::root();
        root.contents_mut().insert("a".into(), Node::from(a));
        root
    }

    fn segs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_parts_resolves_saved_path() {
        let (fs, fell_back) = FileSystem::from_parts(tree(), "/a/b");
        assert!(!fell_back);
        assert_eq!(fs.current_path(), "/a/b");
        assert_eq!(fs.current_folder().name, "b");
    }

    #[test]
    fn test_from_parts_falls_back_to_root() {
        let (fs, fell_back) = FileSystem::from_parts(tree(), "/a/missing");
        assert!(fell_back);
        assert_eq!(fs.current_path(), "/");

        let (fs, fell_back) = FileSystem::from_parts(tree(), "relative/path");
        assert!(fell_back);
        assert_eq!(fs.current_path(), "/");
    }

    #[test]
    fn test_from_parts_stops_before_protected_folder() {
        let mut root = tree();
        let vault = Folder::new("vault").with_password(Some("x".into()));
        let mut inner = Folder::new("inner");
        inner.contents_mut().insert("vault".into(), Node::from(vault));
        root.folder_mut("a").unwrap().contents_mut().insert("inner".into(), Node::from(inner));

        let (fs, fell_back) = FileSystem::from_parts(root, "/a/inner/vault");
        assert!(fell_back);
        assert_eq!(fs.current_path(), "/a/inner");
    }

    #[test]
    fn test_rebase_and_evict() {
        let (mut fs, _) = FileSystem::from_parts(tree(), "/a/b/c");
        fs.rebase_current(&segs(&["a", "b"]), &segs(&["x"]));
        assert_eq!(fs.current_path(), "/x/c");

        fs.evict_current(&segs(&["x"]), &[]);
        assert_eq!(fs.current_path(), "/");
    }
}
