//! Unit tests for the shell configuration loader.

use std::fs;
use std::path::PathBuf;

use novabrowse::services::shell_config::{ShellConfig, ShellConfigLoader, ShellConfigLoaderTrait};
use novabrowse::types::errors::ConfigError;
use tempfile::TempDir;

fn setup() -> (TempDir, ShellConfigLoader) {
    let dir = tempfile::tempdir().unwrap();
    let loader = ShellConfigLoader::new(Some(dir.path().join("config.json")));
    (dir, loader)
}

#[test]
fn test_missing_file_yields_defaults() {
    let (_dir, mut loader) = setup();
    let config = loader.load().unwrap();
    assert_eq!(config, ShellConfig::default());
    assert_eq!(config.history_limit, 100);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_set_config_persists() {
    let (dir, mut loader) = setup();
    let config = ShellConfig {
        database_path: Some("/tmp/nova.db".to_string()),
        homepage_path: None,
        history_limit: 25,
        log_level: "debug".to_string(),
    };
    loader.set_config(config.clone()).unwrap();

    let mut reloaded = ShellConfigLoader::new(Some(dir.path().join("config.json")));
    assert_eq!(reloaded.load().unwrap(), config);
    assert_eq!(reloaded.get_config(), &config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let (dir, mut loader) = setup();
    fs::write(dir.path().join("config.json"), r#"{ "history_limit": 10 }"#).unwrap();

    let config = loader.load().unwrap();
    assert_eq!(config.history_limit, 10);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.homepage_path, ShellConfig::default().homepage_path);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let (dir, mut loader) = setup();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();
    assert!(matches!(loader.load(), Err(ConfigError::SerializationError(_))));
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("config.json");
    let loader = ShellConfigLoader::new(Some(path.clone()));
    loader.save().unwrap();
    assert!(path.exists());
    assert_eq!(loader.get_config_path(), path.as_path());
}

#[test]
fn test_database_path_override() {
    let config = ShellConfig {
        database_path: Some("/var/lib/nova/data.db".to_string()),
        ..ShellConfig::default()
    };
    assert_eq!(config.database_path(), PathBuf::from("/var/lib/nova/data.db"));
}

#[test]
fn test_default_database_file_name() {
    let path = ShellConfig::default().database_path();
    assert!(path.ends_with("browser_data.db"));
}
