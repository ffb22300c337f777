//! Unified error type for Herald collaborators
//!
//! Every collaborator contract (decryption, ingestion, preference lookup) reports
//! failures through [`HeraldError`]. The orchestration layer decides which of those
//! failures are fatal and which are absorbed into fail-safe defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unified error type for all Herald operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum HeraldError {
    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Cryptographic operation failed
    #[error("Crypto error: {message}")]
    Crypto {
        /// Error message describing the cryptographic failure
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// The operation was cancelled through its context
    #[error("Cancelled: {message}")]
    Cancelled {
        /// Error message describing where cancellation was observed
        message: String,
    },

    /// The operation exceeded its context deadline
    #[error("Timeout after {timeout_ms}ms")]
    Timeout {
        /// Budget that was exhausted, in milliseconds
        timeout_ms: u64,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl HeraldError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Create a timeout error from the exhausted budget
    pub fn timeout(budget: Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from the context rather than the collaborator itself
    pub fn is_context_error(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::Timeout { .. })
    }
}

/// Standard Result type for Herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

impl From<std::io::Error> for HeraldError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::TimedOut => Self::Timeout { timeout_ms: 0 },
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HeraldError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for HeraldError {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid(format!("Invalid TOML: {err}"))
    }
}
