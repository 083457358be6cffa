//! Provider configuration

use augur_domain::{GoalSchema, AUTHORIZATION_ARITY, DEFAULT_RULE_NAME};
use augur_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Provider configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Where the provider reads from and how it asks its question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Fact file, one fact per line
    pub facts_path: PathBuf,

    /// Rule program file
    pub rules_path: PathBuf,

    /// Predicate consulted by `is_authorized` (default: "authorised")
    #[serde(default = "default_rule_name")]
    pub rule_name: String,

    /// Arity of the authorization predicate (default: 4)
    #[serde(default = "default_rule_arity")]
    pub rule_arity: usize,

    /// Inferences a single goal may spend (default: 1000000)
    #[serde(default = "default_inference_limit")]
    pub inference_limit: u64,
}

fn default_rule_name() -> String {
    DEFAULT_RULE_NAME.to_string()
}

fn default_rule_arity() -> usize {
    AUTHORIZATION_ARITY
}

fn default_inference_limit() -> u64 {
    EngineConfig::default().inference_limit
}

impl ProviderConfig {
    /// Configuration for the two files with every other setting defaulted
    pub fn new<F: AsRef<Path>, R: AsRef<Path>>(facts_path: F, rules_path: R) -> Self {
        Self {
            facts_path: facts_path.as_ref().to_path_buf(),
            rules_path: rules_path.as_ref().to_path_buf(),
            rule_name: default_rule_name(),
            rule_arity: default_rule_arity(),
            inference_limit: default_inference_limit(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ProviderConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.facts_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("facts_path".to_string()));
        }
        if self.rules_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("rules_path".to_string()));
        }
        if self.rule_name.is_empty() {
            return Err(ConfigError::MissingField("rule_name".to_string()));
        }
        Ok(())
    }

    /// Schema every authorization goal is checked against
    pub fn schema(&self) -> GoalSchema {
        GoalSchema::new(self.rule_name.clone(), self.rule_arity)
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            inference_limit: self.inference_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_uses_defaults() {
        let config = ProviderConfig::new("facts.pl", "rules.pl");
        assert_eq!(config.rule_name, "authorised");
        assert_eq!(config.rule_arity, 4);
        assert_eq!(config.inference_limit, 1_000_000);
        assert_eq!(config.schema().to_string(), "authorised/4");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            facts_path = "/srv/acl/facts.pl"
            rules_path = "/srv/acl/rules.pl"
            rule_name = "allowed"
            rule_arity = 5
        "#;

        let config: ProviderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.facts_path, PathBuf::from("/srv/acl/facts.pl"));
        assert_eq!(config.rule_name, "allowed");
        assert_eq!(config.rule_arity, 5);
        assert_eq!(config.inference_limit, 1_000_000);
        assert_eq!(config.engine_config().inference_limit, 1_000_000);
    }

    #[test]
    fn test_from_file_missing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("provider.toml");
        std::fs::write(&path, "facts_path = \"\"\nrules_path = \"rules.pl\"\n").unwrap();

        let err = ProviderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(field) if field == "facts_path"));
    }

    #[test]
    fn test_from_file_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("provider.toml");
        std::fs::write(&path, "facts_path = ").unwrap();

        assert!(matches!(
            ProviderConfig::from_file(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_from_file_unreadable() {
        assert!(matches!(
            ProviderConfig::from_file("/nonexistent/provider.toml"),
            Err(ConfigError::FileRead(_))
        ));
    }
}
