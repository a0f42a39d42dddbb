//! Node types
//!
//! A node is exactly one of [`File`] or [`Folder`]. Variant-specific data is
//! only reachable through a `match` or the `as_*` accessors.

use indexmap::IndexMap;

/// Ordered child mapping of a folder.
pub type Contents = IndexMap<String, Node>;

/// A leaf holding lines of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    pub password: Option<String>,
    lines: Vec<String>,
}

impl File {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            password: None,
            lines,
        }
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the content joined for display.
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the content wholesale.
    pub fn set_value(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Replaces the line at 1-based `index`.
    ///
    /// Returns the line count as the error when `index` falls outside
    /// `[1, len]`.
    pub fn set_line(&mut self, index: usize, text: String) -> Result<(), usize> {
        let len = self.lines.len();
        match index.checked_sub(1).and_then(|i| self.lines.get_mut(i)) {
            Some(line) => {
                *line = text;
                Ok(())
            }
            None => Err(len),
        }
    }

    /// Drops blank and whitespace-only lines, returning how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line.trim().is_empty());
        before - self.lines.len()
    }
}

/// A named container of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    pub password: Option<String>,
    contents: Contents,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: None,
            contents: Contents::new(),
        }
    }

    /// The unprotected root folder `/`.
    pub fn root() -> Self {
        Self::new("/")
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub(crate) fn contents_mut(&mut self) -> &mut Contents {
        &mut self.contents
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.contents.get(name)
    }

    /// Returns the child folder called `name`, if there is one.
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.contents.get(name).and_then(Node::as_folder)
    }

    pub(crate) fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.contents.get_mut(name).and_then(Node::as_folder_mut)
    }

    pub fn names(&self) -> Vec<String> {
        self.contents.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Variant tag, used where only the kind of a node matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(File),
    Folder(Folder),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Folder(folder) => &folder.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Node::File(file) => file.name = name,
            Node::Folder(folder) => folder.name = name,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            Node::File(file) => file.password.as_deref(),
            Node::Folder(folder) => folder.password.as_deref(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }
}

impl From<File> for Node {
    fn from(file: File) -> Self {
        Node::File(file)
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_value_joins_lines() {
        let file = File::new("a.txt", lines(&["one", "two"]));
        assert_eq!(file.value(), "one\ntwo");
        assert_eq!(File::new("e.txt", vec![]).value(), "");
    }

    #[test]
    fn test_set_line_bounds() {
        let mut file = File::new("a.txt", lines(&["one", "two"]));
        assert_eq!(file.set_line(0, "x".into()), Err(2));
        assert_eq!(file.set_line(3, "x".into()), Err(2));
        assert_eq!(file.set_line(2, "deux".into()), Ok(()));
        assert_eq!(file.lines(), lines(&["one", "deux"]).as_slice());
    }

    #[test]
    fn test_compact_removes_blank_lines() {
        let mut file = File::new("a.txt", lines(&["x", "", "  ", "y"]));
        assert_eq!(file.compact(), 2);
        assert_eq!(file.lines(), lines(&["x", "y"]).as_slice());
    }

    #[test]
    fn test_variant_accessors() {
        let node = Node::from(Folder::new("docs"));
        assert_eq!(node.kind(), NodeKind::Folder);
        assert!(node.as_file().is_none());
        assert_eq!(node.name(), "docs");
        assert_eq!(node.password(), None);
    }
}
