//! Response formatting
//!
//! Renders operation results as console text.

use crate::node::NodeKind;

/// Separator between names in `ls` and `search` output
pub const LIST_SEPARATOR: &str = " | ";

pub const ALREADY_AT_ROOT: &str = "Already at the root directory";
pub const NO_MATCHES: &str = "No matching files";

pub const HELP_TEXT: &str = "\
Commands:
  mkdir <path> [content...]     create a file or folder (missing folders are created)
  ls [path]                     list a folder
  cat <path>                    print a file
  cd <path>                     change folder
  pwd                           print the current folder
  rename <path> <new-name>      rename in place
  mv <src> <dst>                move a file or folder
  cp <src> <dst>                copy a file or folder
  rm <path>                     delete a file or folder
  edit <path> <line> [text...]  replace one line (1-based)
  write <path> [content...]     replace a file's content
  fragment <path>               drop blank lines from a file
  search [folder] <ext>         list files with an extension
  save                          save state now
  clear                         discard all state
  help                          show this text
  exit | quit | q               save and leave
Names starting with '.' are password protected. A name with a dot is a file, \
otherwise a folder; '.name' alone is a protected folder.";

pub fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::File => "file",
        NodeKind::Folder => "folder",
    }
}

/// Joins names for display, `None` when there are none.
pub fn format_listing(entries: &[String]) -> Option<String> {
    if entries.is_empty() {
        None
    } else {
        Some(entries.join(LIST_SEPARATOR))
    }
}
