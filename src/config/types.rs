//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::META_DIR_DEFAULT;
use super::paths;
use crate::meta::MetaExtensions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Subfolder (relative to the destination level) collecting meta files
    pub meta_dir: String,
    /// Extensions routed into `meta_dir`
    pub meta_extensions: MetaExtensions,
    /// Ask before zapping each folder
    pub prompt_before_each_folder: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report the planned moves but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta_dir: META_DIR_DEFAULT.to_string(),
            meta_extensions: MetaExtensions::default(),
            prompt_before_each_folder: false,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path().ok(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit meta settings; other fields use defaults.
    pub fn new(meta_dir: impl Into<String>, meta_extensions: MetaExtensions) -> Self {
        let meta_dir = meta_dir.into();
        Self {
            meta_dir: if meta_dir.trim().is_empty() {
                META_DIR_DEFAULT.to_string()
            } else {
                meta_dir.trim().to_string()
            },
            meta_extensions,
            ..Default::default()
        }
    }
}
