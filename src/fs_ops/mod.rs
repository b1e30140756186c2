//! Filesystem operations behind a zap: batch building, collision probing and
//! the unique rename.

mod batch;
mod helpers;
mod probe;
mod rename;

pub use batch::{PathBatch, build_path_batch};
pub use helpers::{describe_io, traversal_error};
pub use probe::{dir_is_empty_recursive, path_exists_with_name};
pub use rename::{rename_to_unique, restore_name};
