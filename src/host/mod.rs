//! Host seam.
//!
//! The zap engine never talks to a UI or performs a move itself; it calls these
//! collaborators. A shell extension, the bundled CLI or a test double can each
//! supply their own.

mod native;
mod terminal;

use std::path::{Path, PathBuf};

use crate::fs_ops::PathBatch;

pub use native::{NativeFileOps, UuidTokens};
pub use terminal::{AssumeYes, TerminalConfirm, parse_answer};

/// Answer to a yes/no prompt. `YesToAll` also suppresses later prompts in the
/// same invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    YesToAll,
    No,
}

impl Confirmation {
    pub fn proceeds(self) -> bool {
        !matches!(self, Confirmation::No)
    }
}

/// Modal yes/no question.
pub trait Confirm {
    fn confirm(&self, message: &str) -> Confirmation;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> Confirmation,
{
    fn confirm(&self, message: &str) -> Confirmation {
        self(message)
    }
}

/// Result of one batch move call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchMoveStatus {
    /// Every pair moved.
    Completed,
    /// The user cancelled; `moved` pairs were already done.
    Aborted { moved: usize },
    /// Some pairs moved, some failed.
    Partial {
        moved: usize,
        failures: Vec<(PathBuf, String)>,
    },
    /// Nothing moved.
    Failed(String),
}

/// Result of deleting the emptied source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStatus {
    /// Removed outright (it was empty).
    Deleted,
    /// Sent to the recycle bin / trash.
    Recycled,
    /// The user declined the delete confirmation.
    Aborted,
    Failed(String),
}

/// The move and delete primitives.
pub trait FileOperations {
    /// Move every `(from, to)` pair of `batch` in one call. Destinations may
    /// all differ. `silent` suppresses per-item progress.
    fn batch_move(&self, batch: &PathBatch, silent: bool) -> BatchMoveStatus;

    /// Delete `path`. An empty folder is removed directly; otherwise the
    /// folder is recycled when `allow_recycle`, after asking when
    /// `require_confirmation`.
    fn delete_folder(&self, path: &Path, allow_recycle: bool, require_confirmation: bool) -> DeleteStatus;
}

/// Source of collision-free leaf names (128-bit random).
pub trait TokenSource {
    fn unique_token(&self) -> String;
}
