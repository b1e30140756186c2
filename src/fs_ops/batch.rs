//! Folder flattening: compute the from/to path batch for one zap.
//!
//! The walk only reads the filesystem. Nothing is moved here; the batch is
//! handed to a [`FileOperations`](crate::host::FileOperations) implementation
//! afterwards, so a failed walk leaves the tree untouched.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::ZapError;
use crate::meta::MetaExtensions;

use super::helpers::{traversal_error, walk_error};

/// Parallel source/destination lists. Each index is one move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBatch {
    sources: Vec<PathBuf>,
    destinations: Vec<PathBuf>,
}

impl PathBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one move. The only mutator, so both lists always have the same length.
    pub fn push(&mut self, from: PathBuf, to: PathBuf) {
        trace!(src = %from.display(), dest = %to.display(), "batch += move");
        self.sources.push(from);
        self.destinations.push(to);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn destinations(&self) -> &[PathBuf] {
        &self.destinations
    }

    /// Iterate `(from, to)` pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.sources
            .iter()
            .zip(self.destinations.iter())
            .map(|(s, d)| (s.as_path(), d.as_path()))
    }
}

fn destination_for_file(
    destination_dir: &Path,
    path: &Path,
    name: &std::ffi::OsStr,
    meta_dir: &str,
    meta: &MetaExtensions,
) -> PathBuf {
    if meta.is_meta_file(path) {
        destination_dir.join(meta_dir).join(name)
    } else {
        destination_dir.join(name)
    }
}

/// Build the move batch that flattens `source` into `destination_dir`.
///
/// - A regular-file `source` is accepted only if it is a meta file; it is
///   routed to `destination_dir/meta_dir/<name>`. Any other file is rejected
///   with [`ZapError::LoneFile`].
/// - A directory `source` has each child mapped to `destination_dir/<name>`
///   (meta files to `destination_dir/meta_dir/<name>`). With `recursive`,
///   subdirectories are walked instead of moved, so every emitted source is a
///   file and the whole subtree lands on one level.
///
/// Leaf-name clashes between subtrees are not resolved here.
pub fn build_path_batch(
    destination_dir: &Path,
    source: &Path,
    recursive: bool,
    meta_dir: &str,
    meta: &MetaExtensions,
) -> Result<PathBatch, ZapError> {
    let mut batch = PathBatch::new();

    let md = fs::symlink_metadata(source).map_err(traversal_error(source))?;
    if !md.is_dir() {
        let name = source
            .file_name()
            .ok_or_else(|| ZapError::InvalidPath(source.to_path_buf()))?;
        if !meta.is_meta_file(source) {
            return Err(ZapError::LoneFile(source.to_path_buf()));
        }
        batch.push(
            source.to_path_buf(),
            destination_dir.join(meta_dir).join(name),
        );
        return Ok(batch);
    }

    // Links are not followed: a link to a directory is moved as a single
    // entry and never descended into. Sorting keeps batches reproducible.
    let max_depth = if recursive { usize::MAX } else { 1 };
    for entry in WalkDir::new(source)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.map_err(walk_error(source))?;
        let name = entry.file_name().to_os_string();

        if entry.file_type().is_dir() {
            if recursive {
                trace!(folder = %entry.path().display(), "descending");
            } else {
                batch.push(entry.into_path(), destination_dir.join(&name));
            }
            continue;
        }
        let dest = destination_for_file(destination_dir, entry.path(), &name, meta_dir, meta);
        batch.push(entry.into_path(), dest);
    }

    debug!(
        source = %source.display(),
        dest = %destination_dir.display(),
        moves = batch.len(),
        recursive,
        "batch built"
    );
    Ok(batch)
}
