//! Tests for configuration loading and dataset path resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate FKIG_DATA or FKIG_CONFIG are marked with #[serial].

use fkig_common::config::{
    config_file_path, CompiledDefaults, ConfigLoad, DataPathResolver, TomlConfig, CONFIG_ENV_VAR,
    DATA_ENV_VAR,
};
use fkig_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(DATA_ENV_VAR);

    let resolver = DataPathResolver::new(None, TomlConfig::default());
    assert_eq!(resolver.resolve(), CompiledDefaults::default().data_path);
}

#[test]
#[serial]
fn test_resolver_env_var_beats_config() {
    env::set_var(DATA_ENV_VAR, "/tmp/fkig-env-posts.csv");

    let config = TomlConfig {
        data_path: Some(PathBuf::from("/tmp/fkig-config-posts.csv")),
        ..TomlConfig::default()
    };
    let resolver = DataPathResolver::new(None, config);
    assert_eq!(resolver.resolve(), PathBuf::from("/tmp/fkig-env-posts.csv"));

    // Cleanup
    env::remove_var(DATA_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_cli_beats_env_var() {
    env::set_var(DATA_ENV_VAR, "/tmp/fkig-env-posts.csv");

    let resolver = DataPathResolver::new(Some(PathBuf::from("cli.csv")), TomlConfig::default());
    assert_eq!(resolver.resolve(), PathBuf::from("cli.csv"));

    // Cleanup
    env::remove_var(DATA_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_blank_env_var_ignored() {
    env::set_var(DATA_ENV_VAR, "   ");

    let config = TomlConfig {
        data_path: Some(PathBuf::from("/srv/posts.csv")),
        ..TomlConfig::default()
    };
    let resolver = DataPathResolver::new(None, config);
    assert_eq!(resolver.resolve(), PathBuf::from("/srv/posts.csv"));

    // Cleanup
    env::remove_var(DATA_ENV_VAR);
}

#[test]
fn test_toml_config_file_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "data_path = \"/srv/fkig/posts.csv\"").unwrap();
    writeln!(file, "port = 6000").unwrap();
    writeln!(file, "log_level = \"debug\"").unwrap();

    let config = TomlConfig::load(file.path()).expect("config should parse");
    assert_eq!(config.data_path, Some(PathBuf::from("/srv/fkig/posts.csv")));
    assert_eq!(config.port, Some(6000));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "port = \"not a number").unwrap();

    let load = ConfigLoad::from_path(Some(file.path().to_path_buf()));
    assert_eq!(load.config, TomlConfig::default());
    assert!(matches!(load.error, Some(Error::Config(_))));
    assert_eq!(load.path.as_deref(), Some(file.path()));
}

#[test]
fn test_explicit_config_path_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "port = 7001").unwrap();

    let load = ConfigLoad::locate(Some(file.path().to_path_buf()));
    assert!(load.error.is_none());
    assert_eq!(load.config.port, Some(7001));
}

#[test]
#[serial]
fn test_config_env_var_locates_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "data_path = \"/srv/from-env.csv\"").unwrap();
    env::set_var(CONFIG_ENV_VAR, file.path());

    assert_eq!(config_file_path().as_deref(), Some(file.path()));
    let load = ConfigLoad::locate(None);
    assert_eq!(load.config.data_path, Some(PathBuf::from("/srv/from-env.csv")));

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_explicit_config_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/fkig/env-config.toml");

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "port = 7002").unwrap();
    let load = ConfigLoad::locate(Some(file.path().to_path_buf()));
    assert!(load.error.is_none());
    assert_eq!(load.config.port, Some(7002));

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}
