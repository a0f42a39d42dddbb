//! Path resolution
//!
//! Walks a path string against the session tree one segment at a time,
//! checking the access guard at every protected folder it enters by name.
//! `..` pops the tracked segment list; the parent is found again by walking
//! from root, never through a stored back pointer.

use crate::auth::AccessGuard;
use crate::error::FsError;
use crate::filesystem::FileSystem;
use crate::navigate::path::{self, CURRENT, MAX_PATH_DEPTH, PARENT, ParsedPath};
use crate::node::Node;

/// A path that resolved to a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTarget {
    pub segments: Vec<String>,
    /// A `..` was applied while already at root.
    pub at_root: bool,
}

impl FolderTarget {
    pub fn path(&self) -> String {
        path::join(&self.segments)
    }
}

/// A named entry inside a resolved parent folder. The entry itself may or
/// may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTarget {
    pub parent: Vec<String>,
    pub name: String,
}

impl EntryTarget {
    pub fn path(&self) -> String {
        path::child(&self.parent, &self.name)
    }

    pub fn segments(&self) -> Vec<String> {
        let mut segments = self.parent.clone();
        segments.push(self.name.clone());
        segments
    }
}

/// Where a create lands: the deepest existing folder, the folders still to
/// be made below it, and the terminal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub existing: Vec<String>,
    pub missing: Vec<String>,
    pub name: String,
}

impl CreatePlan {
    /// Segments of the folder that will hold the new node.
    pub fn parent(&self) -> Vec<String> {
        let mut segments = self.existing.clone();
        segments.extend(self.missing.iter().cloned());
        segments
    }

    pub fn path(&self) -> String {
        path::child(&self.parent(), &self.name)
    }
}

fn parse(raw: &str) -> Result<ParsedPath<'_>, FsError> {
    let parsed = ParsedPath::parse(raw);
    if parsed.segments.len() > MAX_PATH_DEPTH {
        return Err(FsError::invalid_path(raw));
    }
    Ok(parsed)
}

fn start(fs: &FileSystem, parsed: &ParsedPath<'_>) -> Vec<String> {
    if parsed.absolute {
        Vec::new()
    } else {
        fs.current_segments()
    }
}

/// Walks `segments` as folders from `stack`.
///
/// With `terminal` set, the last segment reports `NotFound`/`NotAFolder`;
/// otherwise every failure is an `InvalidPath`.
fn walk_folders(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    mut stack: Vec<String>,
    segments: &[&str],
    raw: &str,
    terminal: bool,
) -> Result<FolderTarget, FsError> {
    let mut at_root = false;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = terminal && i + 1 == segments.len();
        match *segment {
            CURRENT => {}
            PARENT => {
                if stack.pop().is_none() {
                    at_root = true;
                }
            }
            name => {
                let folder = fs
                    .folder_at(&stack)
                    .ok_or_else(|| FsError::invalid_path(raw))?;
                match folder.get(name) {
                    Some(Node::Folder(child)) => {
                        stack.push(name.to_string());
                        guard.check(&path::join(&stack), child.password.as_deref())?;
                    }
                    Some(Node::File(_)) if is_last => {
                        return Err(FsError::NotAFolder(path::child(&stack, name)));
                    }
                    None if is_last => {
                        return Err(FsError::not_found(path::child(&stack, name)));
                    }
                    Some(Node::File(_)) | None => return Err(FsError::invalid_path(raw)),
                }
            }
        }
    }

    Ok(FolderTarget {
        segments: stack,
        at_root,
    })
}

/// Resolves `raw` to an existing folder.
pub fn resolve_folder(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<FolderTarget, FsError> {
    let parsed = parse(raw)?;
    let stack = start(fs, &parsed);
    walk_folders(fs, guard, stack, &parsed.segments, raw, true)
}

/// Resolves the parent chain of `raw` and names its final segment.
pub fn resolve_entry(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<EntryTarget, FsError> {
    let parsed = parse(raw)?;
    let (name, parents) = parsed
        .split_last()
        .ok_or_else(|| FsError::invalid_path(raw))?;
    if name == PARENT || name == CURRENT {
        return Err(FsError::invalid_path(raw));
    }

    let stack = start(fs, &parsed);
    let parent = walk_folders(fs, guard, stack, parents, raw, false)?;
    Ok(EntryTarget {
        parent: parent.segments,
        name: name.to_string(),
    })
}

/// Returns the node an entry names.
pub fn lookup<'a>(fs: &'a FileSystem, target: &EntryTarget) -> Result<&'a Node, FsError> {
    fs.folder_at(&target.parent)
        .and_then(|folder| folder.get(&target.name))
        .ok_or_else(|| FsError::not_found(target.path()))
}

/// Resolves `raw` to an existing node, checking the guard on the node
/// itself as well as on the folders leading to it.
pub fn resolve_existing<'a>(
    fs: &'a FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<(EntryTarget, &'a Node), FsError> {
    let target = resolve_entry(fs, guard, raw)?;
    let node = lookup(fs, &target)?;
    guard.check_node(&target.path(), node)?;
    Ok((target, node))
}

/// Plans a create at `raw`: existing folders are walked (and guarded),
/// missing ones are collected for creation.
pub fn plan_create(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<CreatePlan, FsError> {
    let parsed = parse(raw)?;
    let (name, parents) = parsed
        .split_last()
        .ok_or_else(|| FsError::invalid_path(raw))?;
    if name == PARENT || name == CURRENT {
        return Err(FsError::invalid_path(raw));
    }

    let mut existing = start(fs, &parsed);
    let mut missing: Vec<String> = Vec::new();

    for segment in parents {
        if !missing.is_empty() {
            if *segment == PARENT || *segment == CURRENT {
                return Err(FsError::invalid_path(raw));
            }
            missing.push(segment.to_string());
            continue;
        }

        match *segment {
            CURRENT => {}
            PARENT => {
                existing.pop();
            }
            segment => {
                let folder = fs
                    .folder_at(&existing)
                    .ok_or_else(|| FsError::invalid_path(raw))?;
                match folder.get(segment) {
                    Some(Node::Folder(child)) => {
                        existing.push(segment.to_string());
                        guard.check(&path::join(&existing), child.password.as_deref())?;
                    }
                    Some(Node::File(_)) => return Err(FsError::invalid_path(raw)),
                    None => missing.push(segment.to_string()),
                }
            }
        }
    }

    Ok(CreatePlan {
        existing,
        missing,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ScriptedPrompt;
    use crate::node::{File, Folder};

    fn fixture() -> FileSystem {
        let mut vault = Folder::new("vault").with_password(Some("x".into()));
        vault
            .contents_mut()
            .insert("f.txt".into(), Node::from(File::new("f.txt", vec!["hi".into()])));
        let mut b = Folder::new("b");
        b.contents_mut()
            .insert("n.txt".into(), Node::from(File::new("n.txt", vec![])));
        let mut a = Folder::new("a");
        a.contents_mut().insert("b".into(), Node::from(b));
        let mut root = Folder::root();
        root.contents_mut().insert("a".into(), Node::from(a));
        root.contents_mut().insert("vault".into(), Node::from(vault));
        FileSystem::from_parts(root, "/a").0
    }

    #[test]
    fn test_resolve_relative_and_absolute_folders() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);

        assert_eq!(resolve_folder(&fs, &mut guard, "b").unwrap().path(), "/a/b");
        assert_eq!(resolve_folder(&fs, &mut guard, "/a/b/").unwrap().path(), "/a/b");
        assert_eq!(resolve_folder(&fs, &mut guard, "/").unwrap().path(), "/");
        assert_eq!(resolve_folder(&fs, &mut guard, "b/..").unwrap().path(), "/a");
    }

    #[test]
    fn test_parent_clamps_at_root() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);

        let target = resolve_folder(&fs, &mut guard, "../..").unwrap();
        assert_eq!(target.path(), "/");
        assert!(target.at_root);
    }

    #[test]
    fn test_folder_errors() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);

        assert_eq!(
            resolve_folder(&fs, &mut guard, "missing"),
            Err(FsError::not_found("/a/missing"))
        );
        assert_eq!(
            resolve_folder(&fs, &mut guard, "b/n.txt"),
            Err(FsError::NotAFolder("/a/b/n.txt".into()))
        );
        assert_eq!(
            resolve_folder(&fs, &mut guard, "b/n.txt/deeper"),
            Err(FsError::invalid_path("b/n.txt/deeper"))
        );
    }

    #[test]
    fn test_guarded_folder_prompts_when_entered() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::new(["wrong"]);
        let mut guard = AccessGuard::new(&mut prompt);
        assert_eq!(
            resolve_existing(&fs, &mut guard, "/vault/f.txt").map(|(t, _)| t),
            Err(FsError::unauthorized("/vault"))
        );
    }

    #[test]
    fn test_plan_create_collects_missing_folders() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);

        let plan = plan_create(&fs, &mut guard, "b/x/y/z.txt").unwrap();
        assert_eq!(plan.existing, vec!["a", "b"]);
        assert_eq!(plan.missing, vec!["x", "y"]);
        assert_eq!(plan.path(), "/a/b/x/y/z.txt");

        assert_eq!(
            plan_create(&fs, &mut guard, "b/n.txt/z.txt"),
            Err(FsError::invalid_path("b/n.txt/z.txt"))
        );
        assert_eq!(
            plan_create(&fs, &mut guard, "/"),
            Err(FsError::invalid_path("/"))
        );
    }

    #[test]
    fn test_path_depth_limit() {
        let fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);
        let deep = vec!["d"; MAX_PATH_DEPTH + 1].join("/");
        assert_eq!(
            plan_create(&fs, &mut guard, &deep),
            Err(FsError::invalid_path(deep.clone()))
        );
    }
}
