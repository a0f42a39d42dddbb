//! State file management
//!
//! Saves and restores the whole session as one JSON document. Writes go to
//! a temporary sibling first and are renamed into place, so a reader never
//! sees a half-written state file.

use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::filesystem::FileSystem;
use crate::persistence::codec::{StateRecord, deserialize_state, serialize_state};

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        self.path.with_extension(format!("{}.tmp", extension))
    }

    /// Persists the tree and the current path.
    pub fn save(&self, session: &FileSystem) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&serialize_state(session))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, json)?;

        // Atomically move temporary file to final location
        match fs::rename(&temp, &self.path) {
            Ok(()) => {
                info!("Saved state to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to rename {} to {}: {}",
                    temp.display(),
                    self.path.display(),
                    e
                );
                let _ = fs::remove_file(&temp);
                Err(e.into())
            }
        }
    }

    /// Reads the state file, `Ok(None)` when there is none.
    pub fn try_load(&self) -> Result<Option<(FileSystem, bool)>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: StateRecord = serde_json::from_str(&json)?;
        deserialize_state(record).map(Some)
    }

    /// Restores the saved session.
    ///
    /// Never fails: a missing or unreadable state file yields an empty root,
    /// a saved path that no longer resolves yields `/`, and a saved path
    /// inside a protected folder stops just outside it.
    pub fn load(&self) -> FileSystem {
        match self.try_load() {
            Ok(Some((session, fell_back))) => {
                if fell_back {
                    warn!(
                        "Saved path in {} could not be restored; starting at {}",
                        self.path.display(),
                        session.current_path()
                    );
                }
                info!("Loaded state from {}", self.path.display());
                session
            }
            Ok(None) => {
                info!("No state at {}; starting empty", self.path.display());
                FileSystem::new()
            }
            Err(e) => {
                warn!(
                    "Could not load {} ({}); starting from an empty root",
                    self.path.display(),
                    e
                );
                FileSystem::new()
            }
        }
    }

    /// Discards the state file and returns a fresh session.
    pub fn clear(&self) -> Result<FileSystem, PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Removed state file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(FileSystem::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccessGuard, PromptRequest, ScriptedPrompt};
    use crate::error::FsError;
    use crate::navigate::change_directory;
    use crate::storage::{Content, create, read_file};
    use tempfile::TempDir;

    fn setup() -> (StateStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        (store, dir)
    }

    fn populated() -> FileSystem {
        let mut fs = FileSystem::new();
        let mut prompt = ScriptedPrompt::new(["pw"]);
        let mut guard = AccessGuard::new(&mut prompt);
        create(&mut fs, &mut guard, "a/b/c.txt", Content::Inline(vec!["x".into()]), "EOF")
            .unwrap();
        create(&mut fs, &mut guard, ".hidden", Content::Inline(vec![]), "EOF").unwrap();
        change_directory(&mut fs, &mut guard, "a/b").unwrap();
        fs
    }

    #[test]
    fn test_save_then_load_restores_session() {
        let (store, _dir) = setup();
        let fs = populated();
        store.save(&fs).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, fs);
        assert_eq!(loaded.current_path(), "/a/b");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_missing_state_loads_empty() {
        let (store, _dir) = setup();
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), FileSystem::new());
    }

    #[test]
    fn test_corrupt_state_degrades_to_empty_root() {
        let (store, _dir) = setup();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), FileSystem::new());
    }

    #[test]
    fn test_stale_path_falls_back_to_root() {
        let (store, _dir) = setup();
        let json = r#"{
            "root": {"type": "folder", "name": "/", "password": null, "contents": {}},
            "path": "/gone/away"
        }"#;
        fs::write(store.path(), json).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.current_path(), "/");
    }

    #[test]
    fn test_load_inside_protected_folder_asks_again() {
        let (store, _dir) = setup();
        let mut fs = FileSystem::new();
        let mut prompt = ScriptedPrompt::new(["x", "x", "x"]);
        let mut guard = AccessGuard::new(&mut prompt);
        create(&mut fs, &mut guard, ".vault", Content::Inline(vec![]), "EOF").unwrap();
        create(
            &mut fs,
            &mut guard,
            ".vault/f.txt",
            Content::Inline(vec!["secret".into()]),
            "EOF",
        )
        .unwrap();
        change_directory(&mut fs, &mut guard, ".vault").unwrap();
        assert_eq!(fs.current_path(), "/.vault");
        store.save(&fs).unwrap();

        let mut loaded = store.load();
        assert_eq!(loaded.current_path(), "/");

        let mut prompt = ScriptedPrompt::empty();
        let mut guard = AccessGuard::new(&mut prompt);
        assert_eq!(
            read_file(&loaded, &mut guard, "f.txt"),
            Err(FsError::not_found("/f.txt"))
        );
        assert_eq!(
            read_file(&loaded, &mut guard, ".vault/f.txt"),
            Err(FsError::InputRequired(PromptRequest::Password {
                path: "/.vault".into()
            }))
        );
        assert!(change_directory(&mut loaded, &mut guard, ".vault").is_err());
        assert_eq!(loaded.current_path(), "/");
    }

    #[test]
    fn test_clear_removes_file() {
        let (store, _dir) = setup();
        store.save(&populated()).unwrap();
        let fresh = store.clear().unwrap();
        assert_eq!(fresh, FileSystem::new());
        assert!(!store.path().exists());
        // Clearing twice is fine
        assert!(store.clear().is_ok());
    }
}
