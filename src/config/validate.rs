//! Config validation logic.
//! The meta directory must be a single plain path component, since it is joined
//! onto the destination level of every zap.

use anyhow::{Result, bail};
use std::path::{Component, Path};
use tracing::debug;

use super::types::Config;

impl Config {
    /// Validate settings that would otherwise corrupt destination paths.
    pub fn validate(&self) -> Result<()> {
        ensure_plain_component(&self.meta_dir, "meta_dir")?;
        if let Some(log_file) = &self.log_file
            && log_file.file_name().is_none()
        {
            bail!("log_file '{}' does not name a file", log_file.display());
        }
        debug!(
            meta_dir = %self.meta_dir,
            meta_files = %self.meta_extensions,
            prompt = self.prompt_before_each_folder,
            "Config validated"
        );
        Ok(())
    }
}

/// Reject empty names, separators, `.`/`..` and absolute/prefixed names.
fn ensure_plain_component(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{name} must not be empty");
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == value => Ok(()),
        _ => bail!("{name} must be a single folder name, got '{value}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaExtensions;

    #[test]
    fn plain_names_pass() {
        let cfg = Config::new("_meta", MetaExtensions::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn separators_and_dots_fail() {
        for bad in ["a/b", "..", ".", "/abs", "x/"] {
            let mut cfg = Config::new("_meta", MetaExtensions::default());
            cfg.meta_dir = bad.to_string();
            assert!(cfg.validate().is_err(), "{bad} should be rejected");
        }
    }
}
