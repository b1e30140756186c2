//! What a single invocation works on: the selected folders, and the request
//! built for each of them.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::meta::MetaExtensions;

/// Ordered list of selected paths, fixed once built.
///
/// Relative paths are resolved against the current directory. Symlinks are
/// not resolved: zapping a link zaps the link's own location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSelection {
    paths: Vec<PathBuf>,
}

impl FolderSelection {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths = paths
            .into_iter()
            .map(|p| absolutize(p.as_ref()))
            .collect();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

fn absolutize(p: &Path) -> PathBuf {
    let abs = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    dunce::simplified(&abs).to_path_buf()
}

/// One folder to zap plus everything needed to do it.
#[derive(Debug, Clone)]
pub struct ZapRequest {
    pub folder: PathBuf,
    pub recursive: bool,
    pub meta_dir: String,
    pub meta_extensions: MetaExtensions,
    /// Skip the per-folder confirmation.
    pub suppress_confirmation: bool,
}

impl ZapRequest {
    pub fn from_config(
        folder: impl Into<PathBuf>,
        config: &Config,
        recursive: bool,
        suppress_confirmation: bool,
    ) -> Self {
        Self {
            folder: folder.into(),
            recursive,
            meta_dir: config.meta_dir.clone(),
            meta_extensions: config.meta_extensions.clone(),
            suppress_confirmation,
        }
    }
}
