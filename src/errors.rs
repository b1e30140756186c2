//! Typed error definitions for level_zap.
//! Every failure is scoped to one folder; the driver logs it and moves on.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZapError {
    #[error("Zap of {0} aborted by user")]
    Aborted(PathBuf),

    #[error("Refusing to zap the meta directory itself in recursive mode: {0}")]
    MetaDirectoryTarget(PathBuf),

    #[error("Could not rename {path} out of the way: {context}")]
    CollisionUnresolvable { path: PathBuf, context: String },

    #[error("Failed to enumerate {path}: {context}")]
    Traversal { path: PathBuf, context: String },

    #[error("Nothing to flatten: {0} is a single non-meta file")]
    LoneFile(PathBuf),

    #[error("Batch move out of {folder} failed: {context}")]
    MoveFailed { folder: PathBuf, context: String },

    #[error("Batch move out of {folder} completed only partially: {moved} of {total} entries moved")]
    MovePartial {
        folder: PathBuf,
        moved: usize,
        total: usize,
    },

    #[error("Contents moved, but deleting {path} failed: {context}")]
    DeleteFailed { path: PathBuf, context: String },

    #[error("Path has no parent or leaf name: {0}")]
    InvalidPath(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl ZapError {
    /// Stable numeric code for logs and scripting.
    pub fn code(&self) -> u16 {
        match self {
            ZapError::Aborted(_) => 1,
            ZapError::MetaDirectoryTarget(_) => 10,
            ZapError::CollisionUnresolvable { .. } => 20,
            ZapError::Traversal { .. } => 30,
            ZapError::LoneFile(_) => 31,
            ZapError::MoveFailed { .. } => 40,
            ZapError::MovePartial { .. } => 41,
            ZapError::DeleteFailed { .. } => 50,
            ZapError::InvalidPath(_) => 60,
            ZapError::Interrupted => 130,
        }
    }

    /// Short machine-friendly name used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ZapError::Aborted(_) => "aborted",
            ZapError::MetaDirectoryTarget(_) => "meta_directory_target",
            ZapError::CollisionUnresolvable { .. } => "collision_unresolvable",
            ZapError::Traversal { .. } => "traversal",
            ZapError::LoneFile(_) => "lone_file",
            ZapError::MoveFailed { .. } => "move_failed",
            ZapError::MovePartial { .. } => "move_partial",
            ZapError::DeleteFailed { .. } => "delete_failed",
            ZapError::InvalidPath(_) => "invalid_path",
            ZapError::Interrupted => "interrupted",
        }
    }

    /// User declines and Ctrl-C are expected outcomes, not failures.
    pub fn is_abort(&self) -> bool {
        matches!(self, ZapError::Aborted(_) | ZapError::Interrupted)
    }
}

/// Summary of one whole invocation, as reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    /// At least one folder was declined or interrupted, none failed.
    Aborted,
    /// At least one folder failed.
    Failed,
    /// The host called in without a populated menu.
    InvalidArgument,
}

impl ResultCode {
    /// Process exit status for the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ResultCode::Ok | ResultCode::Aborted => 0,
            ResultCode::Failed => 1,
            ResultCode::InvalidArgument => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errs = [
            ZapError::Aborted(PathBuf::from("a")),
            ZapError::MetaDirectoryTarget(PathBuf::from("a")),
            ZapError::CollisionUnresolvable { path: PathBuf::from("a"), context: String::new() },
            ZapError::Traversal { path: PathBuf::from("a"), context: String::new() },
            ZapError::LoneFile(PathBuf::from("a")),
            ZapError::MoveFailed { folder: PathBuf::from("a"), context: String::new() },
            ZapError::MovePartial { folder: PathBuf::from("a"), moved: 0, total: 1 },
            ZapError::DeleteFailed { path: PathBuf::from("a"), context: String::new() },
            ZapError::InvalidPath(PathBuf::from("a")),
            ZapError::Interrupted,
        ];
        let mut codes: Vec<u16> = errs.iter().map(ZapError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn only_declines_count_as_abort() {
        assert!(ZapError::Aborted(PathBuf::from("x")).is_abort());
        assert!(ZapError::Interrupted.is_abort());
        assert!(!ZapError::LoneFile(PathBuf::from("x")).is_abort());
    }

    #[test]
    fn only_failures_exit_non_zero() {
        assert_eq!(ResultCode::Ok.exit_code(), 0);
        assert_eq!(ResultCode::Aborted.exit_code(), 0);
        assert_ne!(ResultCode::Failed.exit_code(), 0);
        assert_ne!(ResultCode::InvalidArgument.exit_code(), 0);
    }
}
