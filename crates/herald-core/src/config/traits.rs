//! Core configuration traits for Herald

use crate::HeraldError;
use std::path::Path;

/// Core trait for Herald configuration types
///
/// Configuration is layered: defaults, then an optional file, then environment
/// overrides, then validation.
pub trait HeraldConfig: Clone + Default + Send + Sync + 'static {
    /// Prefix of environment variables that override this configuration
    const ENV_PREFIX: &'static str;

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, HeraldError>;

    /// Merge with another configuration, `other` taking precedence
    fn merge_with(&mut self, other: &Self) -> Result<(), HeraldError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), HeraldError>;

    /// Set a configuration value from a string (env and CLI overrides)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), HeraldError>;

    /// Apply `PREFIX_KEY=value` pairs, ignoring keys without the prefix
    fn merge_with_pairs<I, K, V>(&mut self, pairs: I) -> Result<(), HeraldError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            if let Some(config_key) = key.as_ref().strip_prefix(Self::ENV_PREFIX) {
                self.set_from_string(&config_key.to_lowercase(), value.as_ref())?;
            }
        }
        Ok(())
    }

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), HeraldError> {
        self.merge_with_pairs(std::env::vars())
    }

    /// Defaults, optional file, environment, then validation
    fn load(path: Option<&Path>) -> Result<Self, HeraldError> {
        let mut config = Self::defaults();
        if let Some(path) = path {
            let from_file = Self::load_from_file(path)?;
            config.merge_with(&from_file)?;
        }
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse a boolean override, accepting the usual spellings
pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool, HeraldError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(HeraldError::invalid(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}
