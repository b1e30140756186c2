//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.
//! The loaded `Config` is read once per invocation and passed explicitly into
//! every zap request.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LEVEL_ZAP_CONFIG";

/// Name of the subfolder collecting meta files when none is configured.
pub const META_DIR_DEFAULT: &str = "_meta";
