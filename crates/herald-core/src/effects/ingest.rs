//! Event ingestion effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Collaborator Effect
//! - **Implementation**: `herald-effects` (`MemoryEventIngestor`), test doubles in `herald-testkit`
//! - **Usage**: `herald-push` stage 2 (ingest)
//!
//! Implementations own the consistency of conversation history: a given message
//! must be durably recorded at most once, even under concurrent pushes and sync.

use crate::identifiers::GroupPublicKey;
use crate::types::{IngestOutcome, OutOfStoreMessage};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Records messages delivered through push before the sync stream sees them
#[async_trait]
pub trait EventIngestor: Send + Sync {
    /// Record the message if new and return its interaction with a novelty flag
    async fn ingest_out_of_store_message(
        &self,
        group: &GroupPublicKey,
        message: &OutOfStoreMessage,
        cleartext: &[u8],
    ) -> Result<IngestOutcome>;
}

/// Blanket implementation for Arc<T> where T: EventIngestor
#[async_trait]
impl<T: EventIngestor + ?Sized> EventIngestor for Arc<T> {
    async fn ingest_out_of_store_message(
        &self,
        group: &GroupPublicKey,
        message: &OutOfStoreMessage,
        cleartext: &[u8],
    ) -> Result<IngestOutcome> {
        (**self)
            .ingest_out_of_store_message(group, message, cleartext)
            .await
    }
}
