//! XML config parsing, without touching user state.

use std::fs;
use tempfile::tempdir;

use level_zap::{LogLevel, load_config_from_xml_path};

#[test]
fn reads_all_fields() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let log_file = td.path().join("level_zap.log");
    let xml = format!(
        r#"
<config>
  <meta_dir>_extras</meta_dir>
  <meta_files>nfo, .SFV ,*</meta_files>
  <prompt_user> true </prompt_user>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
</config>
"#,
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");
    assert_eq!(cfg.meta_dir, "_extras");
    let exts: Vec<&str> = cfg.meta_extensions.iter().collect();
    assert_eq!(exts, vec!["*", "nfo", "sfv"]);
    assert!(cfg.prompt_before_each_folder);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert!(cfg.validate().is_ok());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config>\n  <meta_dir>   </meta_dir>\n</config>\n").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.meta_dir, "_meta");
    assert!(cfg.meta_extensions.is_empty());
    assert!(!cfg.prompt_before_each_folder);
    assert_eq!(cfg.log_level, LogLevel::Normal);
}

#[test]
fn unknown_field_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><meta_dirs>x</meta_dirs></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("parse config xml"));
}

#[test]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><meta_dir>x</config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn nested_meta_dir_fails_validation() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><meta_dir>a/b</meta_dir></config>").unwrap();
    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert!(cfg.validate().is_err());
}
