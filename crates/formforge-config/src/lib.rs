//! Configuration system for FormForge.
//!
//! Load run configuration from TOML or YAML files to choose the target
//! length, the input tables and the elimination strategy.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use formforge_config::{FormConfig, StrategyConfig};
//!
//! let config = FormConfig::from_toml_str(r#"
//!     target_length = 75
//!
//!     [inputs]
//!     responses = "beta/responses.csv"
//!
//!     [strategy]
//!     type = "greedy_backward"
//!     reference = "checked"
//! "#).unwrap();
//!
//! assert_eq!(config.target_length().unwrap(), 75);
//! assert!(matches!(config.strategy, StrategyConfig::GreedyBackward(_)));
//! assert_eq!(config.inputs.blueprint.to_str(), Some("alt_blueprint.csv"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FormConfig {
    /// Number of items on the final form.
    #[serde(default)]
    pub target_length: Option<usize>,

    /// Paths of the four input tables.
    #[serde(default)]
    pub inputs: InputConfig,

    /// Elimination strategy.
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl FormConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, YAML for `.yaml`/`.yml`, TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the target length.
    pub fn with_target_length(mut self, target_length: usize) -> Self {
        self.target_length = Some(target_length);
        self
    }

    /// Sets the elimination strategy.
    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the input table paths.
    pub fn with_inputs(mut self, inputs: InputConfig) -> Self {
        self.inputs = inputs;
        self
    }

    /// Returns the target length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the target length is missing
    /// or zero.
    pub fn target_length(&self) -> Result<usize, ConfigError> {
        match self.target_length {
            None => Err(ConfigError::Invalid("target_length is required".to_string())),
            Some(0) => Err(ConfigError::Invalid(
                "target_length must be at least 1".to_string(),
            )),
            Some(n) => Ok(n),
        }
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_length()?;
        if let StrategyConfig::Exhaustive(exhaustive) = &self.strategy {
            if exhaustive.max_subsets == 0 {
                return Err(ConfigError::Invalid(
                    "max_subsets must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Paths of the input tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct InputConfig {
    /// Response log: candidate id, item id, response.
    pub responses: PathBuf,
    /// Blueprint: domain, min, max.
    pub blueprint: PathBuf,
    /// Answer keys: item id, credited response.
    pub keys: PathBuf,
    /// Domain map: item id, domain.
    pub domains: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            responses: PathBuf::from("alt_response_string.csv"),
            blueprint: PathBuf::from("alt_blueprint.csv"),
            keys: PathBuf::from("alt_keys.csv"),
            domains: PathBuf::from("alt_domains.csv"),
        }
    }
}

impl InputConfig {
    /// Resolves relative paths against `base`.
    pub fn relative_to(&self, base: &Path) -> Self {
        Self {
            responses: base.join(&self.responses),
            blueprint: base.join(&self.blueprint),
            keys: base.join(&self.keys),
            domains: base.join(&self.domains),
        }
    }
}

/// Elimination strategy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// One best removal per step.
    GreedyBackward(GreedyConfig),

    /// Best legal subset over all target-sized subsets.
    Exhaustive(ExhaustiveConfig),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::GreedyBackward(GreedyConfig::default())
    }
}

/// Greedy backward elimination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GreedyConfig {
    /// Treatment of the first item of each scan.
    #[serde(default)]
    pub reference: ReferenceItem,
}

/// Treatment of the first item of each greedy scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceItem {
    /// Unchecked baseline, removed unless beaten.
    #[default]
    FirstItem,

    /// Constraint-checked like every other item.
    Checked,
}

/// Exhaustive search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveConfig {
    /// Maximum number of subsets to examine.
    #[serde(default = "default_max_subsets")]
    pub max_subsets: u64,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self {
            max_subsets: default_max_subsets(),
        }
    }
}

fn default_max_subsets() -> u64 {
    100_000
}

#[cfg(test)]
mod tests;
