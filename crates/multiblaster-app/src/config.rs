//! Host configuration: optional TOML file, then environment overrides.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use multiblaster_sim::persistence::{HighscoreStore, JsonFileStore, MemoryStore};
use multiblaster_sim::SimConfig;

pub const CONFIG_PATH_VAR: &str = "MULTIBLASTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "multiblaster.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Unknown keys are rejected so a stale or misspelled setting fails loudly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Session seed shared by every replica.
    pub seed: u64,
    /// Where highscores are saved. In-memory only when unset.
    pub highscores_path: Option<PathBuf>,
    /// Where the session's event log is written on shutdown.
    pub event_log_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            seed: sim.seed,
            highscores_path: None,
            event_log_path: None,
        }
    }
}

impl HostConfig {
    /// Read the config file named by `MULTIBLASTER_CONFIG` (or the default
    /// path), then apply `MULTIBLASTER_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay values from `lookup` (the process environment in production).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("MULTIBLASTER_SEED") {
            self.seed = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "MULTIBLASTER_SEED",
                value,
            })?;
        }
        if let Some(value) = lookup("MULTIBLASTER_HIGHSCORES") {
            self.highscores_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("MULTIBLASTER_EVENT_LOG") {
            self.event_log_path = Some(PathBuf::from(value));
        }
        Ok(())
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig { seed: self.seed }
    }

    pub fn highscore_store(&self) -> Box<dyn HighscoreStore> {
        match &self.highscores_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.seed, 42);
        assert!(config.highscores_path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HostConfig::from_toml("seed = 7\nhighscores_path = \"data/scores.json\"\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.highscores_path, Some(PathBuf::from("data/scores.json")));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            HostConfig::from_toml("seed = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_tick_interval_is_not_configurable() {
        assert!(matches!(
            HostConfig::from_toml("tick_interval_ms = 0"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            HostConfig::from_toml("seed = 3\ntick_interval_ms = 50"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("multiblaster-no-such-config.toml");
        assert_eq!(HostConfig::from_file(&path).unwrap(), HostConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = HostConfig::default();
        config
            .apply_overrides(env_of(&[
                ("MULTIBLASTER_SEED", "99"),
                ("MULTIBLASTER_EVENT_LOG", "session.json"),
            ]))
            .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.event_log_path, Some(PathBuf::from("session.json")));
        assert_eq!(config.sim_config().seed, 99);
    }

    #[test]
    fn test_invalid_seed_override() {
        let mut config = HostConfig::default();
        let err = config
            .apply_overrides(env_of(&[("MULTIBLASTER_SEED", "abc")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "MULTIBLASTER_SEED", .. }));
    }
}
