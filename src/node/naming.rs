//! Name classification for newly created nodes.

use super::types::NodeKind;

/// How a name is interpreted when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    /// `.name` with no further dot.
    HiddenFolder,
    File,
    Folder,
}

impl NameClass {
    pub fn kind(self) -> NodeKind {
        match self {
            NameClass::HiddenFolder | NameClass::Folder => NodeKind::Folder,
            NameClass::File => NodeKind::File,
        }
    }
}

pub fn classify(name: &str) -> NameClass {
    match name.strip_prefix('.') {
        Some(rest) if !rest.contains('.') => NameClass::HiddenFolder,
        _ if name.contains('.') => NameClass::File,
        _ => NameClass::Folder,
    }
}

/// Names starting with `.` get a password when they are created.
pub fn wants_password(name: &str) -> bool {
    name.starts_with('.')
}

/// `.` and `..` are navigation tokens and can never name a node.
pub fn is_navigation_token(name: &str) -> bool {
    name == "." || name == ".."
}
