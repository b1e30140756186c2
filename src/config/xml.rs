//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template if missing (unless LEVEL_ZAP_CONFIG is set).
//!
//! Notes:
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//! - `meta_files` is a single comma/whitespace separated list.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::{CONFIG_ENV, META_DIR_DEFAULT};

use crate::config::types::{Config, LogLevel};
use crate::meta::MetaExtensions;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "meta_dir")]
    meta_dir: Option<String>,
    #[serde(rename = "meta_files")]
    meta_files: Option<String>,
    #[serde(rename = "prompt_user", default, deserialize_with = "de_bool_trimmed_opt")]
    prompt_user: Option<bool>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

/// Outcome of locating and loading the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file existed and parsed.
    Loaded(Config),
    /// No usable file; built-in defaults apply.
    Defaults(Config),
    /// No file existed at the default location; a template was written there
    /// and built-in defaults apply for this run.
    CreatedTemplate(PathBuf, Config),
}

impl LoadResult {
    pub fn into_config(self) -> Config {
        match self {
            LoadResult::Loaded(c) | LoadResult::Defaults(c) | LoadResult::CreatedTemplate(_, c) => c,
        }
    }
}

// Accept "true"/"false"/"1"/"0"/"yes"/"no" with surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.meta_dir = parsed
        .meta_dir
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(META_DIR_DEFAULT)
        .to_string();
    if let Some(list) = parsed.meta_files.as_deref() {
        cfg.meta_extensions = MetaExtensions::parse_list(list);
    }
    cfg.prompt_before_each_folder = parsed.prompt_user.unwrap_or(false);

    if let Some(s) = parsed.log_level.as_deref()
        && let Ok(level) = s.trim().parse::<LogLevel>()
    {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Locate the config file and load it.
///
/// - File exists: parse it (parse errors are returned).
/// - Missing and `LEVEL_ZAP_CONFIG` set: defaults, with a warning.
/// - Missing at the default location: write a template, then defaults.
pub fn load_or_init() -> Result<LoadResult> {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let cfg_path = default_config_path()?;

    if cfg_path.exists() {
        return Ok(LoadResult::Loaded(load_config_from_xml_path(&cfg_path)?));
    }
    if env_set {
        warn!(path = %cfg_path.display(), "{CONFIG_ENV} names a missing file; using defaults");
        return Ok(LoadResult::Defaults(Config::default()));
    }
    match create_template_config(&cfg_path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(cfg_path, Config::default())),
        Err(e) => {
            warn!(error = %e, path = %cfg_path.display(), "could not write template config; using defaults");
            Ok(LoadResult::Defaults(Config::default()))
        }
    }
}

/// Create default template config file and parent directory (best-effort permissions).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/level_zap.log".into());

    let content = format!(
        "<!--\n  level_zap configuration (XML)\n\n    meta_dir     -> folder (next to the zapped folder) collecting meta files\n    meta_files   -> comma separated extensions treated as meta files; '*' = files without extension\n    prompt_user  -> true: confirm each folder; false: zap without asking\n    log_level    -> quiet | normal | info | debug\n    log_file     -> path to log file (optional; stdout/stderr still used)\n\n  CLI flags override XML values.\n-->\n<config>\n  <meta_dir>{}</meta_dir>\n  <meta_files></meta_files>\n  <prompt_user>false</prompt_user>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        META_DIR_DEFAULT, suggested_log
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_to_defaults() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let path = base.join("cfg").join("config.xml");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.meta_dir, META_DIR_DEFAULT);
        assert!(cfg.meta_extensions.is_empty());
        assert!(!cfg.prompt_before_each_folder);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><prompt_user>maybe</prompt_user></config>").unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }
}
