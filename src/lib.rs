//! Core library for `level_zap`.
//!
//! Zapping a folder moves everything inside it up one level, routes meta
//! files (by extension) into a meta subfolder, and removes the emptied
//! folder. Optionally the whole subtree is flattened onto that one level.
//!
//! Modules:
//! - config: XML config, defaults and validation
//! - meta: meta file classification
//! - fs_ops: batch building, collision probing, unique rename
//! - host: traits for prompts, moves, deletes and unique names, plus bundled impls
//! - zap: per-folder orchestration and the whole-selection driver
//! - handler: context-menu style entry point
//! - output/shutdown/platform: user messages, Ctrl-C flag, OS helpers

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod handler;
pub mod host;
pub mod meta;
pub mod output;
pub mod platform;
pub mod selection;
pub mod shutdown;
pub mod zap;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::{ResultCode, ZapError};
pub use fs_ops::{PathBatch, build_path_batch, rename_to_unique};
pub use handler::ContextMenuHandler;
pub use meta::MetaExtensions;
pub use selection::{FolderSelection, ZapRequest};
pub use zap::{FolderResult, ZapOutcome, ZapReport, Zapper};

/// Convenience re-exports for host code and tests.
pub mod prelude {
    pub use crate::config::{Config, LogLevel, default_config_path};
    pub use crate::errors::{ResultCode, ZapError as Error};
    pub use crate::handler::ContextMenuHandler;
    pub use crate::host::{
        AssumeYes, BatchMoveStatus, Confirm, Confirmation, DeleteStatus, FileOperations,
        NativeFileOps, TokenSource, UuidTokens,
    };
    pub use crate::meta::MetaExtensions;
    pub use crate::selection::FolderSelection;
    pub use crate::shutdown::request as request_shutdown;
    pub use crate::zap::{FolderResult, ZapReport, Zapper};

    pub type ZapResult<T> = std::result::Result<T, Error>;
}
