//! Navigation operations implementation

use log::info;

use crate::auth::AccessGuard;
use crate::error::FsError;
use crate::filesystem::FileSystem;
use crate::navigate::resolver::resolve_folder;
use crate::navigate::results::CdResult;

/// Changes the working directory of the session.
///
/// The position only moves once the whole path has resolved and every
/// protected folder on it has been unlocked.
pub fn change_directory(
    fs: &mut FileSystem,
    guard: &mut AccessGuard<'_>,
    target_path: &str,
) -> Result<CdResult, FsError> {
    if target_path.trim().is_empty() {
        return Err(FsError::invalid_path("Empty path provided"));
    }

    let target = resolve_folder(fs, guard, target_path)?;
    fs.set_current_segments(&target.segments);

    info!("Changed directory to {}", fs.current_path());

    Ok(CdResult {
        new_path: fs.current_path().to_string(),
        already_at_root: target.at_root,
    })
}

/// Returns the current working directory.
pub fn print_working_directory(fs: &FileSystem) -> String {
    fs.current_path().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ScriptedPrompt;
    use crate::node::{Folder, Node};

    fn fixture() -> FileSystem {
        let mut a = Folder::new("a");
        a.contents_mut().insert("b".into(), Node::from(Folder::new("b")));
        let mut root = Folder::root();
        root.contents_mut().insert("a".into(), Node::from(a));
        root.contents_mut().insert(
            "vault".into(),
            Node::from(Folder::new("vault").with_password(Some("x".into()))),
        );
        FileSystem::from_parts(root, "/").0
    }

    fn cd(fs: &mut FileSystem, prompt: &mut ScriptedPrompt, path: &str) -> Result<CdResult, FsError> {
        let mut guard = AccessGuard::new(prompt);
        change_directory(fs, &mut guard, path)
    }

    #[test]
    fn test_cd_down_and_back_up() {
        let mut fs = fixture();
        let mut prompt = ScriptedPrompt::empty();

        cd(&mut fs, &mut prompt, "a/b").unwrap();
        assert_eq!(print_working_directory(&fs), "/a/b");
        cd(&mut fs, &mut prompt, "..").unwrap();
        cd(&mut fs, &mut prompt, "..").unwrap();
        assert_eq!(print_working_directory(&fs), "/");

        let result = cd(&mut fs, &mut prompt, "..").unwrap();
        assert!(result.already_at_root);
        assert_eq!(result.new_path, "/");
    }

    #[test]
    fn test_cd_root_from_anywhere() {
        let mut fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        cd(&mut fs, &mut prompt, "/a/b").unwrap();
        let result = cd(&mut fs, &mut prompt, "/").unwrap();
        assert_eq!(result.new_path, "/");
        assert_eq!(fs.current_folder().name, "/");
    }

    #[test]
    fn test_failed_cd_keeps_position() {
        let mut fs = fixture();
        let mut prompt = ScriptedPrompt::empty();
        cd(&mut fs, &mut prompt, "a").unwrap();

        assert!(cd(&mut fs, &mut prompt, "b/missing").is_err());
        assert_eq!(fs.current_path(), "/a");

        let mut wrong = ScriptedPrompt::new(["nope"]);
        assert_eq!(
            cd(&mut fs, &mut wrong, "/vault"),
            Err(FsError::unauthorized("/vault"))
        );
        assert_eq!(fs.current_path(), "/a");
    }
}
