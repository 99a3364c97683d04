//! TOML-based application configuration.
//!
//! Holds CLI-facing defaults only -- never engine semantics. The engine
//! behaves the same regardless of configuration; these values fill in
//! arguments the user left off the command line.
//!
//! Configuration is stored at `~/.config/timetable/config.toml`
//! (`timetable-dev` when `TIMETABLE_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Default values applied when a command-line argument is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Focus quality assumed when `--focus` is not given (1-10).
    #[serde(default = "default_focus_quality")]
    pub focus_quality: u8,
    /// Base intensity for back-cast plans when `--intensity` is not given.
    #[serde(default = "default_backcast_intensity")]
    pub backcast_intensity: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timetable/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

fn default_focus_quality() -> u8 {
    8
}
fn default_backcast_intensity() -> u8 {
    2
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            focus_quality: default_focus_quality(),
            backcast_intensity: default_backcast_intensity(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, creating the default file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    }
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load the configuration, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Write the configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Read a value by dotted key, e.g. `defaults.focus_quality`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other if !other.is_object() => Some(other.to_string()),
            _ => None,
        }
    }

    /// Set a value by dotted key and persist the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse = |field: &str| -> Result<u8, ConfigError> {
            value
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: field.to_string(),
                    message: format!("cannot parse '{value}' as a number"),
                })
        };
        match key {
            "defaults.focus_quality" => {
                let v = parse(key)?;
                if !(1..=10).contains(&v) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("{v} is outside 1..=10"),
                    });
                }
                self.defaults.focus_quality = v;
            }
            "defaults.backcast_intensity" => {
                let v = parse(key)?;
                if !(1..=10).contains(&v) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("{v} is outside 1..=10"),
                    });
                }
                self.defaults.backcast_intensity = v;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        self.save()
    }
}
