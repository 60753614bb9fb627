use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wiki_reconcile_engine::{Locator, LocatorConfig, SegmentConfig, Segmenter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {reason}")]
    ConfigInvalid { config_path: PathBuf, reason: String },
}

/// Tunable constants of the engine. Every key is optional in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locator: LocatorConfig,
    pub segment: SegmentConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .validate()
            .map_err(|reason| ConfigError::ConfigInvalid {
                config_path: config_path.to_path_buf(),
                reason,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/wiki-reconcile");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn locator(&self) -> Locator {
        Locator::new(self.locator)
    }

    pub fn segmenter(&self) -> Segmenter {
        Segmenter::new(self.segment)
    }

    fn validate(&self) -> Result<(), String> {
        let l = &self.locator;
        if l.exact_end_multiplier == 0 || l.max_span_multiplier == 0 {
            return Err("locator multipliers must be at least 1".to_string());
        }
        if l.window_size == 0 {
            return Err("locator.window_size must be at least 1".to_string());
        }
        if l.window_overlap >= l.window_size {
            return Err(format!(
                "locator.window_overlap ({}) must be smaller than locator.window_size ({})",
                l.window_overlap, l.window_size
            ));
        }
        Ok(())
    }
}
