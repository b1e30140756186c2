//! Read-only probes used around the move: name-collision detection before it,
//! emptiness check after it. Unreadable subtrees are skipped, never fatal.

use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

use crate::meta::MetaExtensions;

/// Does `dir` contain an entry that would land on `name` one level up?
///
/// Matches (case-insensitively) a child directory named `name`, or a non-meta
/// file named `name` (meta files go to the meta folder, so they cannot clash).
/// With `recursive`, descendants at any depth count too.
pub fn path_exists_with_name(
    dir: &Path,
    name: &str,
    recursive: bool,
    meta: &MetaExtensions,
) -> bool {
    let wanted = name.to_lowercase();
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(Result::ok)
        .any(|e| {
            if e.file_name().to_string_lossy().to_lowercase() != wanted {
                return false;
            }
            let hit = e.file_type().is_dir() || !meta.is_meta_file(e.path());
            if hit {
                trace!(entry = %e.path().display(), "name collision");
            }
            hit
        })
}

/// True when `dir` holds nothing but (possibly nested) empty directories.
/// An unreadable directory counts as non-empty.
pub fn dir_is_empty_recursive(dir: &Path) -> bool {
    for entry in WalkDir::new(dir).min_depth(1) {
        match entry {
            Ok(e) if e.file_type().is_dir() => continue,
            _ => return false,
        }
    }
    true
}
