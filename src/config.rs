//! Configuration management module
//!
//! Settings come from built-in defaults, then an optional YAML file, then
//! `WD_ACTIONS_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use action_flow::BuilderOptions;
use action_primitives::PointerKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

pub const ENV_PREFIX: &str = "WD_ACTIONS_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: String, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for action sequences built by this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Disable tick padding between devices
    pub async_mode: bool,

    /// Id of the default keyboard
    pub keyboard_id: String,

    /// Id of the default pointer
    pub pointer_id: String,

    /// Kind of the default pointer
    pub pointer_kind: PointerKind,

    /// Default log filter for the binary
    pub log_level: String,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        let options = BuilderOptions::default();
        Self {
            async_mode: options.async_mode,
            keyboard_id: options.keyboard_id,
            pointer_id: options.pointer_id,
            pointer_kind: options.pointer_kind,
            log_level: "info".to_string(),
        }
    }
}

impl ActionsConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyboard_id.is_empty() || self.pointer_id.is_empty() {
            return Err(ConfigError::Invalid("device ids must not be empty".into()));
        }
        if self.keyboard_id == self.pointer_id {
            return Err(ConfigError::Invalid(format!(
                "keyboard and pointer share the id {:?}",
                self.keyboard_id
            )));
        }
        Ok(())
    }

    /// Apply `WD_ACTIONS_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (`WD_ACTIONS_ASYNC_MODE`, ...).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = get("ASYNC_MODE") {
            self.async_mode = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidOverride { key, value }),
            };
        }
        if let Some((_, value)) = get("KEYBOARD_ID") {
            self.keyboard_id = value;
        }
        if let Some((_, value)) = get("POINTER_ID") {
            self.pointer_id = value;
        }
        if let Some((key, value)) = get("POINTER_KIND") {
            self.pointer_kind = value
                .parse()
                .map_err(|_| ConfigError::InvalidOverride { key, value })?;
        }
        if let Some((_, value)) = get("LOG_LEVEL") {
            self.log_level = value;
        }
        self.validate()
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            async_mode: self.async_mode,
            keyboard_id: self.keyboard_id.clone(),
            pointer_id: self.pointer_id.clone(),
            pointer_kind: self.pointer_kind,
        }
    }
}

pub struct LoadedConfig {
    pub config: ActionsConfig,
    pub path: Option<PathBuf>,
}

/// Default lookup location: `./config/wd-actions.yaml`, then the user's
/// config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("config/wd-actions.yaml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|mut path| {
        path.push("wd-actions");
        path.push("config.yaml");
        path
    })
}

pub async fn load_config(config_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let mut config = match &path {
        Some(path) if path.exists() => {
            let content = fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
            let config = ActionsConfig::from_yaml_str(&content)?;
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        Some(path) if config_path.is_some() => {
            return Err(ConfigError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        _ => {
            warn!("Config file not found, using defaults");
            ActionsConfig::default()
        }
    };

    config.apply_env_overrides()?;
    Ok(LoadedConfig { config, path })
}
