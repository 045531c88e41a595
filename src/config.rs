use std::path::Path;

use tracing::warn;

use crate::ai::{PolicyConfig, ScoreTable, SearchConfig};
use crate::error::ConfigError;

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub heuristic: ScoreTable,
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.search;
        if s.early_depth == 0 || s.default_depth == 0 || s.late_depth == 0 {
            return Err(ConfigError::Validation(
                "search depths must be >= 1".into(),
            ));
        }
        if s.early_threshold > s.late_threshold {
            return Err(ConfigError::Validation(
                "search.early_threshold must be <= search.late_threshold".into(),
            ));
        }
        if s.win_score <= 0 {
            return Err(ConfigError::Validation(
                "search.win_score must be > 0".into(),
            ));
        }
        if s.best_first_max_moves == 0 {
            return Err(ConfigError::Validation(
                "search.best_first_max_moves must be >= 1".into(),
            ));
        }
        if s.node_limit == Some(0) {
            return Err(ConfigError::Validation(
                "search.node_limit must be >= 1 when set".into(),
            ));
        }
        if s.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(
                "search.time_limit_ms must be >= 1 when set".into(),
            ));
        }

        let h = &self.heuristic;
        if h.own_four <= 0 || h.own_three < 0 || h.own_two < 0 {
            return Err(ConfigError::Validation(
                "heuristic own_* scores must be >= 0 (own_four > 0)".into(),
            ));
        }
        if h.opp_four >= 0 || h.opp_three > 0 || h.opp_two > 0 {
            return Err(ConfigError::Validation(
                "heuristic opp_* scores must be <= 0 (opp_four < 0)".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
