//! Collision-avoidance rename.
//!
//! A folder `X/foo` that itself contains `foo` cannot be flattened into `X`
//! while it is still called `foo`. It is first renamed to a random sibling
//! name; destinations are computed against `X`, so the temporary name never
//! shows up in the result.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::ZapError;
use crate::host::TokenSource;

use super::helpers::describe_io;

/// Rename directory `path` to `<parent>/<token>` and return the new path.
///
/// Anything that is not a directory is returned unchanged: a file occupying
/// the name is never moved pre-emptively. On failure the original stays in place.
pub fn rename_to_unique(path: &Path, tokens: &dyn TokenSource) -> Result<PathBuf, ZapError> {
    let is_dir = fs::symlink_metadata(path)
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Ok(path.to_path_buf());
    }

    let parent = path
        .parent()
        .ok_or_else(|| ZapError::InvalidPath(path.to_path_buf()))?;
    let renamed = parent.join(tokens.unique_token());
    if fs::symlink_metadata(&renamed).is_ok() {
        return Err(ZapError::CollisionUnresolvable {
            path: path.to_path_buf(),
            context: format!("generated name '{}' is already taken", renamed.display()),
        });
    }

    fs::rename(path, &renamed).map_err(|e| ZapError::CollisionUnresolvable {
        path: path.to_path_buf(),
        context: describe_io("rename", path, &e),
    })?;
    info!(src = %path.display(), dest = %renamed.display(), "Renamed folder out of the way");
    Ok(renamed)
}

/// Undo [`rename_to_unique`] after a failed traversal. Best-effort: a failure
/// is logged and the folder keeps its temporary name.
pub fn restore_name(renamed: &Path, original: &Path) -> bool {
    match fs::rename(renamed, original) {
        Ok(()) => {
            info!(src = %renamed.display(), dest = %original.display(), "Restored folder name");
            true
        }
        Err(e) => {
            warn!(
                error = %describe_io("rename", renamed, &e),
                left_at = %renamed.display(),
                "Could not restore folder name"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    struct Fixed(&'static str);
    impl TokenSource for Fixed {
        fn unique_token(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn directory_gets_token_name() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("foo/a.txt").write_str("a").unwrap();
        let renamed = rename_to_unique(&t.path().join("foo"), &Fixed("tok-1")).unwrap();
        assert_eq!(renamed, t.path().join("tok-1"));
        t.child("tok-1/a.txt").assert("a");
        assert!(!t.path().join("foo").exists());
    }

    #[test]
    fn file_is_left_alone() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("foo").write_str("f").unwrap();
        let same = rename_to_unique(&t.path().join("foo"), &Fixed("tok-1")).unwrap();
        assert_eq!(same, t.path().join("foo"));
        assert!(!t.path().join("tok-1").exists());
    }

    #[test]
    fn taken_token_is_unresolvable() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("foo").create_dir_all().unwrap();
        t.child("tok-1").create_dir_all().unwrap();
        let err = rename_to_unique(&t.path().join("foo"), &Fixed("tok-1")).unwrap_err();
        assert!(matches!(err, ZapError::CollisionUnresolvable { .. }));
        assert!(t.path().join("foo").is_dir());
    }

    #[test]
    fn restore_round_trip() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("foo").create_dir_all().unwrap();
        let original = t.path().join("foo");
        let renamed = rename_to_unique(&original, &Fixed("tmp")).unwrap();
        assert!(restore_name(&renamed, &original));
        assert!(original.is_dir());
    }
}
