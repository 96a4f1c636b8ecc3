//! Configuration loading and dataset path resolution
//!
//! Dataset path priority order:
//! 1. Command-line argument (highest priority)
//! 2. `FKIG_DATA` environment variable
//! 3. `data_path` in the TOML config file
//! 4. Compiled default (`data/posts.csv`)
//!
//! A missing or malformed config file is never fatal: it is logged and the
//! next tier is used.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable overriding the dataset path
pub const DATA_ENV_VAR: &str = "FKIG_DATA";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "FKIG_CONFIG";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Path to the posts CSV
    pub data_path: Option<PathBuf>,
    /// HTTP port for the dashboard
    pub port: Option<u16>,
    /// Tracing filter directive, e.g. "info" or "fkig_dash=debug"
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Outcome of reading the config file at startup
///
/// The file is read before tracing is initialised (its `log_level` seeds the
/// filter), so the outcome is kept and logged later via [`ConfigLoad::report`].
#[derive(Debug)]
pub struct ConfigLoad {
    /// File that was tried, if any
    pub path: Option<PathBuf>,
    /// Parsed settings, or defaults when the file is missing or unusable
    pub config: TomlConfig,
    /// Why the file was ignored
    pub error: Option<Error>,
}

impl ConfigLoad {
    /// Read `path`, falling back to defaults on any error
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path.as_deref().map(TomlConfig::load) {
            Some(Ok(config)) => Self {
                path,
                config,
                error: None,
            },
            Some(Err(e)) => Self {
                path,
                config: TomlConfig::default(),
                error: Some(e),
            },
            None => Self {
                path: None,
                config: TomlConfig::default(),
                error: None,
            },
        }
    }

    /// Explicit path if given, otherwise [`config_file_path`]
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        Self::from_path(explicit.or_else(config_file_path))
    }

    /// Log which config is in effect
    pub fn report(&self) {
        match (&self.path, &self.error) {
            (_, Some(e)) => warn!("Ignoring config file, using defaults: {}", e),
            (Some(path), None) => info!("Config file: {}", path.display()),
            (None, None) => info!("No config file found - using defaults"),
        }
    }
}

/// Values used when nothing else is configured
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub data_path: PathBuf,
    pub port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/posts.csv"),
            port: 5790,
            log_level: "info".to_string(),
        }
    }
}

/// Locate the config file for the current platform
///
/// `FKIG_CONFIG` wins if set. On Linux `~/.config/fkig/config.toml` is tried
/// before `/etc/fkig/config.toml`; elsewhere only the user config dir is used.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("fkig").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fkig/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolves the dataset path through the priority tiers
#[derive(Debug, Clone, Default)]
pub struct DataPathResolver {
    cli_arg: Option<PathBuf>,
    config: TomlConfig,
    defaults: CompiledDefaults,
}

impl DataPathResolver {
    pub fn new(cli_arg: Option<PathBuf>, config: TomlConfig) -> Self {
        Self {
            cli_arg,
            config,
            defaults: CompiledDefaults::default(),
        }
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(DATA_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &self.config.data_path {
            return path.clone();
        }

        // Priority 4: Compiled default
        self.defaults.data_path.clone()
    }
}
