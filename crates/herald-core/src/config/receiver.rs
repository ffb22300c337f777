//! Push receiver configuration

use super::traits::{parse_bool, HeraldConfig};
use crate::HeraldError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound accepted for `default_timeout_ms` (5 minutes)
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Configuration of the push receive orchestration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiverConfig {
    /// Deadline applied to a receive request when the caller supplies none
    pub default_timeout_ms: Option<u64>,
    /// Log absorbed preference lookup failures at `warn` instead of `debug`
    pub log_degraded_lookups: bool,
    /// Body shown in place of message content when previews are hidden
    pub hidden_preview_body: String,
    /// Notification title
    pub fallback_title: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: None,
            log_degraded_lookups: true,
            hidden_preview_body: "New message".to_string(),
            fallback_title: "Herald".to_string(),
        }
    }
}

impl ReceiverConfig {
    /// Default deadline as a `Duration`
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout_ms.map(Duration::from_millis)
    }
}

impl HeraldConfig for ReceiverConfig {
    const ENV_PREFIX: &'static str = "HERALD_PUSH_";

    fn load_from_file(path: &Path) -> Result<Self, HeraldError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HeraldError::invalid(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn merge_with(&mut self, other: &Self) -> Result<(), HeraldError> {
        let defaults = Self::default();
        if other.default_timeout_ms.is_some() {
            self.default_timeout_ms = other.default_timeout_ms;
        }
        if other.log_degraded_lookups != defaults.log_degraded_lookups {
            self.log_degraded_lookups = other.log_degraded_lookups;
        }
        if other.hidden_preview_body != defaults.hidden_preview_body {
            self.hidden_preview_body.clone_from(&other.hidden_preview_body);
        }
        if other.fallback_title != defaults.fallback_title {
            self.fallback_title.clone_from(&other.fallback_title);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), HeraldError> {
        if let Some(timeout_ms) = self.default_timeout_ms {
            if timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS {
                return Err(HeraldError::invalid(format!(
                    "default_timeout_ms must be between 1 and {MAX_TIMEOUT_MS}, got {timeout_ms}"
                )));
            }
        }
        if self.hidden_preview_body.trim().is_empty() {
            return Err(HeraldError::invalid("hidden_preview_body cannot be empty"));
        }
        if self.fallback_title.trim().is_empty() {
            return Err(HeraldError::invalid("fallback_title cannot be empty"));
        }
        Ok(())
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), HeraldError> {
        match key {
            "default_timeout_ms" => {
                let value = value.trim();
                self.default_timeout_ms = if value.is_empty() || value.eq_ignore_ascii_case("none")
                {
                    None
                } else {
                    Some(value.parse().map_err(|e| {
                        HeraldError::invalid(format!("default_timeout_ms: {e}"))
                    })?)
                };
            }
            "log_degraded_lookups" => self.log_degraded_lookups = parse_bool(key, value)?,
            "hidden_preview_body" => self.hidden_preview_body = value.to_string(),
            "fallback_title" => self.fallback_title = value.to_string(),
            other => {
                return Err(HeraldError::invalid(format!(
                    "Unknown receiver config key: {other}"
                )))
            }
        }
        Ok(())
    }
}
