//! CLI definition and parsing.
//!
//! Notes:
//! - FOLDER arguments lose one pair of surrounding shell quotes before use.
//! - --debug is a shorthand for --log-level debug.
//! - CLI flags override values loaded from the XML config.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::meta::MetaExtensions;

/// Zap folders: move their contents up one level, then remove them.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move a folder's contents up one level and remove the folder"
)]
pub struct Args {
    /// Folders (or, with --recursive, meta files) to zap, processed in order.
    #[arg(
        value_name = "FOLDER",
        value_hint = ValueHint::AnyPath,
        required_unless_present = "print_config"
    )]
    pub folders: Vec<PathBuf>,

    /// Flatten the whole subtree onto the parent level.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Do not ask before each folder.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// No prompts at all; moves and deletes run silently.
    #[arg(long)]
    pub no_ui: bool,

    /// Print the planned moves and change nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Override the meta subfolder name.
    #[arg(long, value_name = "NAME")]
    pub meta_dir: Option<String>,

    /// Override the meta extension list, e.g. "nfo,sfv,*".
    #[arg(long, value_name = "LIST")]
    pub meta_files: Option<String>,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file as well.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print the config file location used by level_zap and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Selected paths with stray shell quoting removed.
    pub fn resolved_folders(&self) -> Vec<PathBuf> {
        self.folders.iter().map(|p| Self::sanitize_path(p)).collect()
    }

    // PowerShell and CMD sometimes hand over one pair of surrounding quotes, or
    // a trailing backslash left inside them. Only that outer pair and one
    // trailing separator go; every other character is part of the name.
    // Paths that are not valid UTF-8 cannot carry those artifacts and pass
    // through untouched.
    fn sanitize_path(path: &Path) -> PathBuf {
        let Some(s) = path.to_str() else {
            return path.to_path_buf();
        };
        let mut inner = match s.as_bytes() {
            [b'"', .., b'"'] | [b'\'', .., b'\''] if s.len() >= 2 => &s[1..s.len() - 1],
            _ => s,
        };
        // CMD turns `"C:\dir\"` into `C:\dir"`. A quote cannot be part of
        // a Windows name, so a trailing one is always that artifact.
        #[cfg(windows)]
        if let Some(stripped) = inner.strip_suffix('"') {
            inner = stripped;
        }

        // Keep a bare root such as "/".
        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner = &inner[..inner.len() - 1];
        }
        PathBuf::from(inner)
    }

    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config in place. Unset flags are no-ops.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.meta_dir {
            cfg.meta_dir = dir.trim().to_string();
        }
        if let Some(list) = &self.meta_files {
            cfg.meta_extensions = MetaExtensions::parse_list(list);
        }
        if self.yes || self.no_ui {
            cfg.prompt_before_each_folder = false;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("level_zap").chain(v.iter().copied())).unwrap()
    }

    #[test]
    fn folders_required_unless_printing_config() {
        assert!(Args::try_parse_from(["level_zap"]).is_err());
        assert!(Args::try_parse_from(["level_zap", "--print-config"]).is_ok());
    }

    #[test]
    fn quotes_and_trailing_separator_are_stripped() {
        let a = args(&["'/tmp/some dir/'", "\"C:\\Media\\Show\\\""]);
        assert_eq!(
            a.resolved_folders(),
            vec![PathBuf::from("/tmp/some dir"), PathBuf::from("C:\\Media\\Show")]
        );
        assert_eq!(Args::sanitize_path(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn quotes_inside_a_name_are_kept() {
        let a = args(&["/data/Bob's Music", "/data/say \"hi\" now", "'/data/it's'"]);
        assert_eq!(
            a.resolved_folders(),
            vec![
                PathBuf::from("/data/Bob's Music"),
                PathBuf::from("/data/say \"hi\" now"),
                PathBuf::from("/data/it's"),
            ]
        );
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_name() {
        let a = args(&[" /data/padded ", "\" /data/quoted \""]);
        assert_eq!(
            a.resolved_folders(),
            vec![PathBuf::from(" /data/padded "), PathBuf::from(" /data/quoted ")]
        );
    }

    #[test]
    fn a_lone_quote_is_not_a_pair() {
        assert_eq!(Args::sanitize_path(Path::new("'")), PathBuf::from("'"));
        assert_eq!(Args::sanitize_path(Path::new("'x")), PathBuf::from("'x"));
        assert_eq!(Args::sanitize_path(Path::new("x'")), PathBuf::from("x'"));
    }

    #[cfg(windows)]
    #[test]
    fn cmd_trailing_quote_artifact_is_dropped() {
        assert_eq!(
            Args::sanitize_path(Path::new("C:\\Media\\Film\"")),
            PathBuf::from("C:\\Media\\Film")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_pass_through() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let raw = Path::new(OsStr::from_bytes(b"/data/caf\xe9'"));
        assert_eq!(Args::sanitize_path(raw), raw.to_path_buf());
    }

    #[test]
    fn overrides_win_over_config() {
        let a = args(&["-r", "-y", "--dry-run", "--meta-dir", "extras", "--meta-files", ".NFO,sfv", "-d", "x"]);
        let mut cfg = Config::default();
        cfg.prompt_before_each_folder = true;
        a.apply_overrides(&mut cfg);
        assert!(a.recursive);
        assert_eq!(cfg.meta_dir, "extras");
        assert!(cfg.meta_extensions.is_meta_extension("nfo"));
        assert!(!cfg.prompt_before_each_folder);
        assert!(cfg.dry_run);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn unset_flags_leave_config_alone() {
        let a = args(&["x"]);
        let mut cfg = Config::new("_keep", MetaExtensions::new(["tmp"]));
        cfg.prompt_before_each_folder = true;
        a.apply_overrides(&mut cfg);
        assert_eq!(cfg.meta_dir, "_keep");
        assert!(cfg.meta_extensions.is_meta_extension("tmp"));
        assert!(cfg.prompt_before_each_folder);
        assert_eq!(a.effective_log_level(), None);
    }
}
