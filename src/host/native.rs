//! Filesystem-backed collaborators: `std::fs` renames for the batch move,
//! `trash` for recycle-bin deletes and `uuid` for unique names.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

use super::{BatchMoveStatus, Confirm, Confirmation, DeleteStatus, FileOperations, TokenSource};
use crate::fs_ops::{PathBatch, describe_io, dir_is_empty_recursive};

/// Moves with `fs::rename`, creating destination parents as needed. An
/// existing destination is never overwritten; that pair is reported as failed
/// and the rest of the batch continues.
pub struct NativeFileOps {
    confirm: Option<Box<dyn Confirm>>,
}

impl NativeFileOps {
    /// Ask `confirm` before recycling a non-empty folder.
    pub fn new(confirm: Box<dyn Confirm>) -> Self {
        Self {
            confirm: Some(confirm),
        }
    }

    /// Never ask; used without UI.
    pub fn silent() -> Self {
        Self { confirm: None }
    }

    fn move_one(from: &Path, to: &Path) -> Result<(), String> {
        if fs::symlink_metadata(to).is_ok() {
            return Err(format!("destination '{}' already exists", to.display()));
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| describe_io("create directory", parent, &e))?;
        }
        fs::rename(from, to).map_err(|e| describe_io("move", from, &e))
    }
}

impl FileOperations for NativeFileOps {
    fn batch_move(&self, batch: &PathBatch, silent: bool) -> BatchMoveStatus {
        let mut moved = 0usize;
        let mut failures = Vec::new();

        for (from, to) in batch.pairs() {
            match Self::move_one(from, to) {
                Ok(()) => {
                    moved += 1;
                    if silent {
                        debug!(src = %from.display(), dest = %to.display(), "moved");
                    } else {
                        info!(src = %from.display(), dest = %to.display(), "moved");
                    }
                }
                Err(context) => {
                    warn!(src = %from.display(), dest = %to.display(), %context, "move failed");
                    failures.push((from.to_path_buf(), context));
                }
            }
        }

        match (moved, failures.is_empty()) {
            (_, true) => BatchMoveStatus::Completed,
            (0, false) => BatchMoveStatus::Failed(
                failures
                    .into_iter()
                    .map(|(_, c)| c)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            (moved, false) => BatchMoveStatus::Partial { moved, failures },
        }
    }

    fn delete_folder(&self, path: &Path, allow_recycle: bool, require_confirmation: bool) -> DeleteStatus {
        if dir_is_empty_recursive(path) {
            return match remove_empty_tree(path) {
                Ok(()) => DeleteStatus::Deleted,
                Err(e) => DeleteStatus::Failed(describe_io("remove directory", path, &e)),
            };
        }
        if !allow_recycle {
            return DeleteStatus::Failed(format!(
                "'{}' is not empty and recycling is not allowed",
                path.display()
            ));
        }
        if require_confirmation
            && let Some(confirm) = &self.confirm
        {
            let msg = format!(
                "'{}' still has contents that were not moved. Send it to the trash?",
                path.display()
            );
            if confirm.confirm(&msg) == Confirmation::No {
                return DeleteStatus::Aborted;
            }
        }
        match trash::delete(path) {
            Ok(()) => DeleteStatus::Recycled,
            Err(e) => DeleteStatus::Failed(format!("trash '{}': {e}", path.display())),
        }
    }
}

/// Remove a tree of empty directories, deepest first. `remove_dir` refuses a
/// non-empty directory, so anything that appeared after the emptiness check
/// stops the removal and stays on disk.
fn remove_empty_tree(path: &Path) -> io::Result<()> {
    for entry in WalkDir::new(path).contents_first(true).sort_by_file_name() {
        let entry = entry?;
        fs::remove_dir(entry.path())?;
    }
    Ok(())
}

/// Random v4 UUIDs, hyphenated lowercase.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn unique_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn batch_move_creates_parents_and_reports_completion() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("src/a.txt").write_str("a").unwrap();
        let mut batch = PathBatch::new();
        batch.push(t.path().join("src/a.txt"), t.path().join("dst/meta/a.txt"));

        let status = NativeFileOps::silent().batch_move(&batch, true);
        assert_eq!(status, BatchMoveStatus::Completed);
        t.child("dst/meta/a.txt").assert("a");
    }

    #[test]
    fn existing_destination_is_not_overwritten() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("src/a.txt").write_str("new").unwrap();
        t.child("src/b.txt").write_str("b").unwrap();
        t.child("a.txt").write_str("old").unwrap();
        let mut batch = PathBatch::new();
        batch.push(t.path().join("src/a.txt"), t.path().join("a.txt"));
        batch.push(t.path().join("src/b.txt"), t.path().join("b.txt"));

        match NativeFileOps::silent().batch_move(&batch, true) {
            BatchMoveStatus::Partial { moved, failures } => {
                assert_eq!(moved, 1);
                assert_eq!(failures.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        t.child("a.txt").assert("old");
        t.child("src/a.txt").assert("new");
    }

    #[test]
    fn existing_destination_directory_is_not_merged() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("foo/sub/new.txt").write_str("n").unwrap();
        t.child("foo/top.txt").write_str("t").unwrap();
        t.child("sub/old.txt").write_str("o").unwrap();
        let mut batch = PathBatch::new();
        batch.push(t.path().join("foo/sub"), t.path().join("sub"));
        batch.push(t.path().join("foo/top.txt"), t.path().join("top.txt"));

        match NativeFileOps::silent().batch_move(&batch, true) {
            BatchMoveStatus::Partial { moved, failures } => {
                assert_eq!(moved, 1);
                assert_eq!(failures[0].0, t.path().join("foo/sub"));
            }
            other => panic!("unexpected {other:?}"),
        }
        t.child("foo/sub/new.txt").assert("n");
        assert!(!t.path().join("sub/new.txt").exists());
        t.child("sub/old.txt").assert("o");
    }

    #[test]
    fn empty_folder_is_deleted_directly() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("gone/inner").create_dir_all().unwrap();
        let status = NativeFileOps::silent().delete_folder(&t.path().join("gone"), true, false);
        assert_eq!(status, DeleteStatus::Deleted);
        assert!(!t.path().join("gone").exists());
    }

    #[test]
    fn empty_tree_removal_stops_at_content() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("tree/a/b").create_dir_all().unwrap();
        t.child("tree/a/late.txt").write_str("late").unwrap();

        assert!(remove_empty_tree(&t.path().join("tree")).is_err());
        t.child("tree/a/late.txt").assert("late");
        assert!(!t.path().join("tree/a/b").exists());
    }

    #[test]
    fn declined_recycle_keeps_folder() {
        let t = assert_fs::TempDir::new().unwrap();
        t.child("keep/x.txt").write_str("x").unwrap();
        let ops = NativeFileOps::new(Box::new(|_: &str| Confirmation::No));
        let status = ops.delete_folder(&t.path().join("keep"), true, true);
        assert_eq!(status, DeleteStatus::Aborted);
        t.child("keep/x.txt").assert("x");
    }

    #[test]
    fn tokens_are_distinct_uuids() {
        let a = UuidTokens.unique_token();
        let b = UuidTokens.unique_token();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
