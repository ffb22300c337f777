//! Push receive failures
//!
//! Only the decrypt and ingest stages can fail a receive. Both are reported under
//! one internal classification; the stage and the collaborator's own error are
//! kept for diagnostics.

use herald_core::HeraldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the receive pipeline whose failure is fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiveStage {
    /// Push payload decryption
    Decrypt,
    /// Out-of-store message ingestion
    Ingest,
}

impl fmt::Display for ReceiveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decrypt => write!(f, "decrypt"),
            Self::Ingest => write!(f, "ingest"),
        }
    }
}

/// Error returned by a failed push receive
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushReceiveError {
    /// A fatal stage failed; no notification must be produced
    #[error("Internal error: push {stage} failed: {source}")]
    Internal {
        /// Stage that failed
        stage: ReceiveStage,
        /// Underlying collaborator error
        #[source]
        source: HeraldError,
    },
}

impl PushReceiveError {
    /// Wrap a collaborator failure under the internal classification
    pub fn internal(stage: ReceiveStage, source: HeraldError) -> Self {
        Self::Internal { stage, source }
    }

    /// Stage that failed
    pub fn stage(&self) -> ReceiveStage {
        match self {
            Self::Internal { stage, .. } => *stage,
        }
    }

    /// Collaborator error behind this failure
    pub fn cause(&self) -> &HeraldError {
        match self {
            Self::Internal { source, .. } => source,
        }
    }
}

impl From<PushReceiveError> for HeraldError {
    fn from(err: PushReceiveError) -> Self {
        HeraldError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn internal_error_preserves_cause() {
        let err = PushReceiveError::internal(ReceiveStage::Ingest, HeraldError::storage("locked"));

        assert_eq!(err.stage(), ReceiveStage::Ingest);
        assert_eq!(err.cause(), &HeraldError::storage("locked"));
        assert_eq!(
            err.to_string(),
            "Internal error: push ingest failed: Storage error: locked"
        );

        let source = err.source().expect("source is kept");
        assert_eq!(source.to_string(), "Storage error: locked");
    }

    #[test]
    fn converts_into_internal_herald_error() {
        let err = PushReceiveError::internal(ReceiveStage::Decrypt, HeraldError::crypto("tag"));
        assert!(matches!(
            HeraldError::from(err),
            HeraldError::Internal { .. }
        ));
    }
}
