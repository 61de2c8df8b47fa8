//! Service settings.

use std::fmt;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Knobs for the match service. Every field has a default, so an empty
/// source yields a working configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Restrict every session to the matches it created.
    #[serde(default = "default_owner_scoped")]
    pub owner_scoped: bool,
    #[serde(default = "default_max_team_name_len")]
    pub max_team_name_len: usize,
}

fn default_owner_scoped() -> bool {
    true
}

fn default_max_team_name_len() -> usize {
    64
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            owner_scoped: default_owner_scoped(),
            max_team_name_len: default_max_team_name_len(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Source(config::ConfigError),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Source(e) => write!(f, "config source error: {}", e),
            ConfigError::Json(e) => write!(f, "config json error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Source(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Source(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl ServiceConfig {
    /// Load from an optional file at `path`, then `VOLLEYSCORE_*` variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("VOLLEYSCORE"))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_team_name_len == 0 {
            return Err(ConfigError::Invalid(
                "max_team_name_len must be at least 1".into(),
            ));
        }
        Ok(self)
    }
}
