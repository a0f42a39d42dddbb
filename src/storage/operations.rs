//! Storage operations
//!
//! Handles the namespace operations behind the shell commands: create, list,
//! read, rename, move, copy, delete and the line-level file edits.
//!
//! Every operation resolves paths and passes the access guard before its
//! first mutation, so a failure leaves the tree and the current position as
//! they were.

use log::info;

use crate::auth::AccessGuard;
use crate::error::FsError;
use crate::filesystem::FileSystem;
use crate::navigate::path::{self, CURRENT, PARENT, ParsedPath};
use crate::navigate::resolver::{
    EntryTarget, lookup, plan_create, resolve_entry, resolve_existing, resolve_folder,
};
use crate::node::{File, Folder, Node, NodeKind, classify, wants_password};
use crate::storage::results::{CreateResult, DeleteResult, ListResult, RelocateResult};
use crate::utils::validation::is_valid_name;

/// Where the lines of a new or rewritten file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Inline(Vec<String>),
    /// Ask the prompt provider, reading until the terminator line.
    Interactive,
}

impl Content {
    fn collect(
        self,
        guard: &mut AccessGuard<'_>,
        path: &str,
        terminator: &str,
    ) -> Result<Vec<String>, FsError> {
        match self {
            Content::Inline(lines) => Ok(lines),
            Content::Interactive => guard.content(path, terminator),
        }
    }
}

/// Creates a file or folder at `raw`, making any missing parent folders.
///
/// The terminal name decides the kind (see [`classify`]). An existing node
/// with the same name is replaced.
pub fn create(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
    content: Content,
    terminator: &str,
) -> Result<CreateResult, FsError> {
    let plan = plan_create(fs, guard, raw)?;
    if !plan
        .missing
        .iter()
        .chain(std::iter::once(&plan.name))
        .all(|name| is_valid_name(name))
    {
        return Err(FsError::invalid_path(raw));
    }

    // Prompts are collected in path order, before anything is inserted
    let mut segments = plan.existing.clone();
    let mut new_folders = Vec::with_capacity(plan.missing.len());
    for name in &plan.missing {
        segments.push(name.clone());
        let password = if wants_password(name) {
            guard.new_password(&path::join(&segments))?
        } else {
            None
        };
        new_folders.push(Folder::new(name.as_str()).with_password(password));
    }

    let target_path = plan.path();
    let existing = if plan.missing.is_empty() {
        fs.folder_at(&plan.existing)
            .and_then(|folder| folder.get(&plan.name))
    } else {
        None
    };
    if let Some(node) = existing {
        guard.check_node(&target_path, node)?;
    }
    let replaced = existing.is_some();

    let password = if wants_password(&plan.name) {
        guard.new_password(&target_path)?
    } else {
        None
    };
    let kind = classify(&plan.name).kind();
    let mut node = match kind {
        NodeKind::Folder => Node::from(Folder::new(plan.name.as_str()).with_password(password)),
        NodeKind::File => {
            let lines = content.collect(guard, &target_path, terminator)?;
            Node::from(File::new(plan.name.as_str(), lines).with_password(password))
        }
    };

    // Nest the new node inside the new folders, innermost first
    let created_folders = (1..=plan.missing.len())
        .map(|depth| {
            let mut segments = plan.existing.clone();
            segments.extend(plan.missing[..depth].iter().cloned());
            path::join(&segments)
        })
        .collect();
    while let Some(mut folder) = new_folders.pop() {
        folder
            .contents_mut()
            .insert(node.name().to_string(), node);
        node = Node::from(folder);
    }

    let parent = fs
        .folder_at_mut(&plan.existing)
        .ok_or_else(|| FsError::invalid_path(raw))?;
    parent.contents_mut().insert(node.name().to_string(), node);

    if replaced {
        let mut replaced_segments = plan.existing.clone();
        replaced_segments.push(plan.name.clone());
        fs.evict_current(&replaced_segments, &plan.existing);
    }

    info!("Created {:?} {}", kind, target_path);

    Ok(CreateResult {
        path: target_path,
        kind,
        created_folders,
        replaced,
    })
}

/// Lists the entries of a folder, defaulting to the current one.
pub fn list_directory(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: Option<&str>,
) -> Result<ListResult, FsError> {
    let target = resolve_folder(fs, guard, raw.unwrap_or(CURRENT))?;
    let folder = fs
        .folder_at(&target.segments)
        .ok_or_else(|| FsError::not_found(target.path()))?;

    Ok(ListResult {
        path: target.path(),
        entries: folder.names(),
    })
}

/// Resolves `raw` to an existing file and passes its guard.
fn guarded_file(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<EntryTarget, FsError> {
    let target = resolve_entry(fs, guard, raw)?;
    let node = lookup(fs, &target)?;
    if node.as_file().is_none() {
        return Err(FsError::NotAFile(target.path()));
    }
    guard.check_node(&target.path(), node)?;
    Ok(target)
}

fn file_mut<'a>(fs: &'a mut FileSystem, target: &EntryTarget) -> Result<&'a mut File, FsError> {
    fs.folder_at_mut(&target.parent)
        .and_then(|folder| folder.contents_mut().get_mut(&target.name))
        .and_then(Node::as_file_mut)
        .ok_or_else(|| FsError::NotAFile(target.path()))
}

/// Returns a file's content.
pub fn read_file(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<String, FsError> {
    let target = guarded_file(fs, guard, raw)?;
    lookup(fs, &target)?
        .as_file()
        .map(File::value)
        .ok_or_else(|| FsError::NotAFile(target.path()))
}

/// Replaces a file's content wholesale.
pub fn write_file(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
    content: Content,
    terminator: &str,
) -> Result<usize, FsError> {
    let target = guarded_file(fs, guard, raw)?;
    let lines = content.collect(guard, &target.path(), terminator)?;
    let count = lines.len();
    file_mut(fs, &target)?.set_value(lines);

    info!("Wrote {} lines to {}", count, target.path());
    Ok(count)
}

/// Replaces the 1-based line `index` of a file.
pub fn edit_line(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
    index: usize,
    text: String,
) -> Result<(), FsError> {
    let target = guarded_file(fs, guard, raw)?;
    file_mut(fs, &target)?
        .set_line(index, text)
        .map_err(|len| FsError::OutOfRange { index, len })?;

    info!("Edited line {} of {}", index, target.path());
    Ok(())
}

/// Removes blank and whitespace-only lines from a file.
pub fn fragment(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<usize, FsError> {
    let target = guarded_file(fs, guard, raw)?;
    let removed = file_mut(fs, &target)?.compact();

    info!("Compacted {}: {} blank lines removed", target.path(), removed);
    Ok(removed)
}

/// Renames an entry within its folder.
///
/// The entry keeps its position in the listing. The new name must be free.
pub fn rename(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
    new_name: &str,
) -> Result<RelocateResult, FsError> {
    if !is_valid_name(new_name) {
        return Err(FsError::invalid_path(new_name));
    }

    let (source, node) = resolve_existing(fs, guard, raw)?;
    let kind = node.kind();
    let dest = EntryTarget {
        parent: source.parent.clone(),
        name: new_name.to_string(),
    };
    if dest.name == source.name {
        return Ok(RelocateResult {
            from: source.path(),
            to: dest.path(),
            kind,
        });
    }
    if lookup(fs, &dest).is_ok() {
        return Err(FsError::NameCollision(dest.path()));
    }

    let folder = fs
        .folder_at_mut(&source.parent)
        .ok_or_else(|| FsError::invalid_path(raw))?;
    let contents = folder.contents_mut();
    let (index, _, mut node) = contents
        .shift_remove_full(&source.name)
        .ok_or_else(|| FsError::not_found(source.path()))?;
    node.set_name(dest.name.clone());
    contents.shift_insert(index, dest.name.clone(), node);

    fs.rebase_current(&source.segments(), &dest.segments());

    info!("Renamed {} to {}", source.path(), dest.path());
    Ok(RelocateResult {
        from: source.path(),
        to: dest.path(),
        kind,
    })
}

/// Resolves the destination of a move or copy.
///
/// An existing folder receives the source under its own name; anything else
/// names the new entry directly.
fn destination(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
    source_name: &str,
) -> Result<EntryTarget, FsError> {
    let parsed = ParsedPath::parse(raw);
    let names_folder = parsed
        .segments
        .last()
        .is_none_or(|last| *last == PARENT || *last == CURRENT);
    if names_folder {
        let folder = resolve_folder(fs, guard, raw)?;
        return Ok(EntryTarget {
            parent: folder.segments,
            name: source_name.to_string(),
        });
    }

    let entry = resolve_entry(fs, guard, raw)?;
    match lookup(fs, &entry) {
        Ok(Node::Folder(folder)) => {
            guard.check(&entry.path(), folder.password.as_deref())?;
            Ok(EntryTarget {
                parent: entry.segments(),
                name: source_name.to_string(),
            })
        }
        _ => Ok(entry),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    Move,
    Copy,
}

fn relocate(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    src: &str,
    dst: &str,
    mode: Relocation,
) -> Result<RelocateResult, FsError> {
    let (source, node) = resolve_existing(fs, guard, src)?;
    let kind = node.kind();
    let snapshot = (mode == Relocation::Copy).then(|| node.clone());

    let dest = destination(fs, guard, dst, &source.name)?;
    if !is_valid_name(&dest.name) {
        return Err(FsError::invalid_path(dst));
    }
    if mode == Relocation::Move && dest.parent.starts_with(&source.segments()) {
        return Err(FsError::invalid_path(dst));
    }
    if lookup(fs, &dest).is_ok() {
        return Err(FsError::NameCollision(dest.path()));
    }

    let mut node = match snapshot {
        Some(copy) => copy,
        None => fs
            .folder_at_mut(&source.parent)
            .and_then(|folder| folder.contents_mut().shift_remove(&source.name))
            .ok_or_else(|| FsError::not_found(source.path()))?,
    };
    node.set_name(dest.name.clone());
    fs.folder_at_mut(&dest.parent)
        .ok_or_else(|| FsError::invalid_path(dst))?
        .contents_mut()
        .insert(dest.name.clone(), node);

    if mode == Relocation::Move {
        fs.rebase_current(&source.segments(), &dest.segments());
    }

    info!("{:?} {} to {}", mode, source.path(), dest.path());
    Ok(RelocateResult {
        from: source.path(),
        to: dest.path(),
        kind,
    })
}

/// Moves an entry, with its subtree and password, to `dst`.
pub fn move_node(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    src: &str,
    dst: &str,
) -> Result<RelocateResult, FsError> {
    relocate(fs, guard, src, dst, Relocation::Move)
}

/// Copies an entry, with its subtree and password, to `dst`.
pub fn copy_node(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    src: &str,
    dst: &str,
) -> Result<RelocateResult, FsError> {
    relocate(fs, guard, src, dst, Relocation::Copy)
}

/// Deletes an entry and, for a folder, everything below it.
pub fn delete(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: &str,
) -> Result<DeleteResult, FsError> {
    let (target, node) = resolve_existing(fs, guard, raw)?;
    let kind = node.kind();

    fs.folder_at_mut(&target.parent)
        .and_then(|folder| folder.contents_mut().shift_remove(&target.name))
        .ok_or_else(|| FsError::not_found(target.path()))?;
    fs.evict_current(&target.segments(), &target.parent);

    info!("Deleted {:?} {}", kind, target.path());
    Ok(DeleteResult {
        path: target.path(),
        kind,
    })
}

/// Normalizes an extension token to its leading-dot form.
fn normalize_extension(token: &str) -> Result<String, FsError> {
    let stem = token.trim().trim_start_matches('.');
    if stem.is_empty() {
        return Err(FsError::malformed(format!("invalid extension '{}'", token)));
    }
    Ok(format!(".{}", stem))
}

/// Lists the files directly inside a folder whose name is `*.ext` with
/// exactly one dot.
pub fn search(
    fs: &FileSystem,
    guard: &mut AccessGuard<'_>,
    raw: Option<&str>,
    extension: &str,
) -> Result<ListResult, FsError> {
    let extension = normalize_extension(extension)?;
    let target = resolve_folder(fs, guard, raw.unwrap_or(CURRENT))?;
    let folder = fs
        .folder_at(&target.segments)
        .ok_or_else(|| FsError::not_found(target.path()))?;

    let entries = folder
        .contents()
        .iter()
        .filter(|(name, node)| {
            matches!(node, Node::File(_))
                && name.matches('.').count() == 1
                && name.len() > extension.len()
                && name.ends_with(&extension)
        })
        .map(|(name, _)| name.clone())
        .collect();

    Ok(ListResult {
        path: target.path(),
        entries,
    })
}
