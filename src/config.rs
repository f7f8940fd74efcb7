//! Runtime configuration: defaults, then a TOML file, then `BOOTHFORM_*` variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides, e.g. `BOOTHFORM_BACKEND_ORIGIN`.
pub const ENV_PREFIX: &str = "BOOTHFORM_";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "BOOTHFORM_CONFIG";

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_ORIGIN: &str = "https://form-backend-g7sk.onrender.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the submission backend; `/submit` is appended.
    pub backend_origin: String,
    /// Show a distinct failure dialog instead of the thank-you message when
    /// delivery fails. Off by default: the confirmation is always shown.
    pub report_failures: bool,
    /// `tracing` filter directive used when `BOOTHFORM_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            report_failures: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `BOOTHFORM_CONFIG` or the platform config
    /// directory (`~/.config/boothform/config.toml`); a missing file is fine.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_config_path()?,
        };
        Self::load_from(&path)
    }

    /// Loads configuration layered over the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).only(&[
                "backend_origin",
                "report_failures",
                "log_level",
            ]))
            .extract()?;
        Ok(config)
    }
}

/// Returns `<config_dir>/boothform/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("boothform").join("config.toml"))
}
