//! Meta file classification.
//!
//! A meta file is one whose extension is listed in the configured set. The set
//! may contain the `*` sentinel, which matches files with no extension at all
//! (it does not match everything).

use std::collections::BTreeSet;
use std::path::Path;

/// Sentinel entry matching only the empty extension.
pub const ANY_EXTENSION: &str = "*";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaExtensions {
    exts: BTreeSet<String>,
}

impl MetaExtensions {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts = items
            .into_iter()
            .filter_map(|s| normalize(s.as_ref()))
            .collect();
        Self { exts }
    }

    /// Parse a comma/whitespace/semicolon separated list such as `"nfo, .SFV *"`.
    pub fn parse_list(s: &str) -> Self {
        Self::new(s.split(|c: char| c == ',' || c == ';' || c.is_whitespace()))
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    /// Membership test for a bare extension (no leading dot, any case).
    pub fn is_meta_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        if ext.is_empty() {
            return self.exts.contains(ANY_EXTENSION);
        }
        self.exts.contains(&ext)
    }

    /// Classify a path by its final extension: the text after the last dot of
    /// the file name. `a.tar.gz` -> `gz`, `.env` -> `env`, `README` -> none.
    /// A space after the last dot means there is no extension (`v1. final`).
    pub fn is_meta_file(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) if !ext.contains(' ') => ext,
            _ => "",
        };
        self.is_meta_extension(ext)
    }
}

impl std::fmt::Display for MetaExtensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}

fn normalize(raw: &str) -> Option<String> {
    let t = raw.trim().trim_start_matches('.');
    if t.is_empty() {
        None
    } else {
        Some(t.to_lowercase())
    }
}
