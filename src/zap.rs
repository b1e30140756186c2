//! Zap orchestration.
//!
//! Per folder: confirm, get out of the way of a same-named child, build the
//! batch, move it in one call, then remove the emptied folder. Every failure
//! is scoped to its folder; [`Zapper::zap_all_folders`] logs it and carries on.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::{ResultCode, ZapError};
use crate::fs_ops::{
    PathBatch, build_path_batch, dir_is_empty_recursive, path_exists_with_name, rename_to_unique,
    restore_name,
};
use crate::host::{BatchMoveStatus, Confirm, Confirmation, DeleteStatus, FileOperations, TokenSource};
use crate::selection::{FolderSelection, ZapRequest};
use crate::shutdown;

/// What happened to one folder that was zapped (or planned, in dry-run).
#[derive(Debug)]
pub struct ZapOutcome {
    pub folder: PathBuf,
    /// Temporary name used to dodge a same-named child.
    pub renamed_to: Option<PathBuf>,
    pub batch: PathBatch,
    pub dry_run: bool,
    /// Removing the emptied folder failed. The moved content is unaffected.
    pub delete_error: Option<ZapError>,
}

#[derive(Debug)]
pub enum FolderResult {
    Zapped(ZapOutcome),
    /// Not attempted; the reason is for display.
    Skipped(&'static str),
    Failed(ZapError),
}

/// One entry per selected path, in selection order.
#[derive(Debug, Default)]
pub struct ZapReport {
    entries: Vec<(PathBuf, FolderResult)>,
}

impl ZapReport {
    fn push(&mut self, folder: &Path, result: FolderResult) {
        self.entries.push((folder.to_path_buf(), result));
    }

    pub fn entries(&self) -> &[(PathBuf, FolderResult)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Any non-abort failure wins, then any abort, else `Ok`.
    pub fn result_code(&self) -> ResultCode {
        let mut aborted = false;
        for (_, result) in &self.entries {
            if let FolderResult::Failed(e) = result {
                if !e.is_abort() {
                    return ResultCode::Failed;
                }
                aborted = true;
            }
        }
        if aborted { ResultCode::Aborted } else { ResultCode::Ok }
    }
}

/// Runs zaps against a set of host collaborators.
pub struct Zapper<'h> {
    config: &'h Config,
    confirm: &'h dyn Confirm,
    files: &'h dyn FileOperations,
    tokens: &'h dyn TokenSource,
    silent: bool,
    assume_yes: bool,
}

impl<'h> Zapper<'h> {
    pub fn new(
        config: &'h Config,
        confirm: &'h dyn Confirm,
        files: &'h dyn FileOperations,
        tokens: &'h dyn TokenSource,
    ) -> Self {
        Self {
            config,
            confirm,
            files,
            tokens,
            silent: false,
            assume_yes: false,
        }
    }

    /// No UI: never prompt, move and delete silently.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Answer every per-folder prompt with yes.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Zap every path of `selection` in order.
    pub fn zap_all_folders(&self, selection: &FolderSelection, recursive: bool) -> ZapReport {
        let mut report = ZapReport::default();
        let prompting = !self.silent && !self.assume_yes;
        let mut yes_to_all = !prompting || !self.config.prompt_before_each_folder;

        if recursive && prompting && !self.config.dry_run {
            let msg = format!(
                "Zap {} item(s) recursively? Every file below them moves up into the parent folder.",
                selection.len()
            );
            if !self.confirm.confirm(&msg).proceeds() {
                info!(items = selection.len(), "Recursive zap declined");
                for folder in selection.iter() {
                    report.push(folder, FolderResult::Failed(ZapError::Aborted(folder.to_path_buf())));
                }
                return report;
            }
            yes_to_all = true;
        }

        for folder in selection.iter() {
            if shutdown::is_requested() {
                report.push(folder, FolderResult::Failed(ZapError::Interrupted));
                continue;
            }

            // Classified without following links. A missing path falls
            // through and fails in the walk.
            if let Ok(md) = fs::symlink_metadata(folder) {
                if md.file_type().is_symlink() {
                    debug!(path = %folder.display(), "Symbolic link; skipped");
                    report.push(folder, FolderResult::Skipped("symbolic link"));
                    continue;
                }
                if !recursive && !md.is_dir() {
                    debug!(path = %folder.display(), "Not a directory; skipped outside recursive mode");
                    report.push(folder, FolderResult::Skipped("not a directory"));
                    continue;
                }
            }

            let request = ZapRequest::from_config(folder, self.config, recursive, !prompting);
            match self.zap_folder(&request, &mut yes_to_all) {
                Ok(outcome) => {
                    if let Some(e) = &outcome.delete_error {
                        warn!(code = e.code(), kind = e.kind(), folder = %folder.display(), error = %e, "Zapped, but cleanup failed");
                    }
                    report.push(folder, FolderResult::Zapped(outcome));
                }
                Err(e) if e.is_abort() => {
                    info!(code = e.code(), kind = e.kind(), folder = %folder.display(), "Zap skipped");
                    report.push(folder, FolderResult::Failed(e));
                }
                Err(e) => {
                    error!(code = e.code(), kind = e.kind(), folder = %folder.display(), error = %e, "Zap failed");
                    report.push(folder, FolderResult::Failed(e));
                }
            }
        }
        report
    }

    /// Zap one folder. `yes_to_all` is shared across the selection; a
    /// "yes to all" answer sets it.
    pub fn zap_folder(&self, request: &ZapRequest, yes_to_all: &mut bool) -> Result<ZapOutcome, ZapError> {
        let folder = request.folder.as_path();
        let (parent, leaf) = match (folder.parent(), folder.file_name()) {
            (Some(p), Some(l)) => (p, l.to_string_lossy().into_owned()),
            _ => return Err(ZapError::InvalidPath(folder.to_path_buf())),
        };

        if request.recursive && leaf == request.meta_dir {
            return Err(ZapError::MetaDirectoryTarget(folder.to_path_buf()));
        }

        if self.config.dry_run {
            let batch = build_path_batch(parent, folder, request.recursive, &request.meta_dir, &request.meta_extensions)?;
            info!(folder = %folder.display(), moves = batch.len(), "Dry-run: nothing changed");
            return Ok(ZapOutcome {
                folder: folder.to_path_buf(),
                renamed_to: None,
                batch,
                dry_run: true,
                delete_error: None,
            });
        }

        if !request.suppress_confirmation && !*yes_to_all {
            let msg = format!(
                "Zap '{}'? Its contents move up into '{}' and the folder is removed.",
                folder.display(),
                parent.display()
            );
            match self.confirm.confirm(&msg) {
                Confirmation::No => return Err(ZapError::Aborted(folder.to_path_buf())),
                Confirmation::YesToAll => *yes_to_all = true,
                Confirmation::Yes => {}
            }
        }

        let mut renamed_to = None;
        let mut working = folder.to_path_buf();
        if path_exists_with_name(folder, &leaf, request.recursive, &request.meta_extensions) {
            let renamed = rename_to_unique(folder, self.tokens)?;
            if renamed != folder {
                working = renamed.clone();
                renamed_to = Some(renamed);
            }
        }

        let batch = match build_path_batch(
            parent,
            &working,
            request.recursive,
            &request.meta_dir,
            &request.meta_extensions,
        ) {
            Ok(b) => b,
            Err(e) => {
                if renamed_to.is_some() {
                    restore_name(&working, folder);
                }
                return Err(e);
            }
        };

        if batch.is_empty() {
            debug!(folder = %folder.display(), "Nothing to move");
        } else {
            let failure = match self.files.batch_move(&batch, self.silent) {
                BatchMoveStatus::Completed => None,
                BatchMoveStatus::Aborted { moved } => {
                    info!(moved, total = batch.len(), folder = %folder.display(), "Batch move cancelled");
                    Some(ZapError::Aborted(folder.to_path_buf()))
                }
                BatchMoveStatus::Partial { moved, .. } => Some(ZapError::MovePartial {
                    folder: folder.to_path_buf(),
                    moved,
                    total: batch.len(),
                }),
                BatchMoveStatus::Failed(context) => Some(ZapError::MoveFailed {
                    folder: folder.to_path_buf(),
                    context,
                }),
            };
            if let Some(e) = failure {
                if renamed_to.is_some() {
                    warn!(left_at = %working.display(), folder = %folder.display(), "Remaining content keeps its temporary folder name");
                }
                return Err(e);
            }
            info!(folder = %folder.display(), moves = batch.len(), "Moved contents up one level");
        }

        // A lone meta file was moved itself; there is no folder left to remove.
        let delete_error = if working.is_dir() {
            self.remove_source(&working)
        } else {
            None
        };

        Ok(ZapOutcome {
            folder: folder.to_path_buf(),
            renamed_to,
            batch,
            dry_run: false,
            delete_error,
        })
    }

    fn remove_source(&self, path: &Path) -> Option<ZapError> {
        let require_confirmation = !self.silent && !dir_is_empty_recursive(path);
        match self.files.delete_folder(path, true, require_confirmation) {
            DeleteStatus::Deleted | DeleteStatus::Recycled => {
                debug!(path = %path.display(), "Removed source folder");
                None
            }
            DeleteStatus::Aborted => Some(ZapError::DeleteFailed {
                path: path.to_path_buf(),
                context: "deletion declined".to_string(),
            }),
            DeleteStatus::Failed(context) => Some(ZapError::DeleteFailed {
                path: path.to_path_buf(),
                context,
            }),
        }
    }
}
