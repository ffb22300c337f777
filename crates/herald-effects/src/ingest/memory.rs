//! In-memory event ingestor
//!
//! Records each out-of-store message at most once, keyed by its cid. The
//! cleartext is a JSON [`AppMessage`]; the interaction lands in the conversation
//! of the group the message was addressed to.

use async_trait::async_trait;
use herald_core::{
    ConversationId, DevicePublicKey, EventIngestor, GroupPublicKey, HeraldError, IngestOutcome,
    InteractionRecord, InteractionType, MessageCid, OutOfStoreMessage, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Application message carried as push cleartext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMessage {
    /// Kind of interaction
    pub kind: InteractionType,
    /// Interaction payload
    #[serde(default)]
    pub payload: String,
    /// Sender-declared send time, ms since UNIX epoch
    pub sent_date_ms: u64,
}

impl AppMessage {
    /// Text message sent at `sent_date_ms`
    pub fn user_message(text: impl Into<String>, sent_date_ms: u64) -> Self {
        Self {
            kind: InteractionType::UserMessage,
            payload: text.into(),
            sent_date_ms,
        }
    }

    /// JSON encoding used as push cleartext
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode push cleartext
    pub fn decode(cleartext: &[u8]) -> Result<Self> {
        serde_json::from_slice(cleartext)
            .map_err(|e| HeraldError::serialization(format!("Undecodable app message: {e}")))
    }
}

/// In-memory [`EventIngestor`]
#[derive(Debug, Clone, Default)]
pub struct MemoryEventIngestor {
    interactions: Arc<RwLock<HashMap<MessageCid, InteractionRecord>>>,
    own_devices: Arc<RwLock<HashSet<DevicePublicKey>>>,
}

impl MemoryEventIngestor {
    /// Create an empty ingestor
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat messages signed by `device` as authored by this account
    pub async fn add_own_device(&self, device: DevicePublicKey) {
        self.own_devices.write().await.insert(device);
    }

    /// Interaction recorded for `cid`, if any
    pub async fn interaction(&self, cid: &MessageCid) -> Option<InteractionRecord> {
        self.interactions.read().await.get(cid).cloned()
    }

    /// Number of recorded interactions
    pub async fn len(&self) -> usize {
        self.interactions.read().await.len()
    }

    /// Whether nothing has been recorded yet
    pub async fn is_empty(&self) -> bool {
        self.interactions.read().await.is_empty()
    }
}

#[async_trait]
impl EventIngestor for MemoryEventIngestor {
    async fn ingest_out_of_store_message(
        &self,
        group: &GroupPublicKey,
        message: &OutOfStoreMessage,
        cleartext: &[u8],
    ) -> Result<IngestOutcome> {
        let app = AppMessage::decode(cleartext)?;
        let is_mine = self
            .own_devices
            .read()
            .await
            .contains(&message.device_public_key);

        let mut interactions = self.interactions.write().await;
        if let Some(existing) = interactions.get(&message.cid) {
            debug!(cid = %message.cid, "out-of-store message already recorded");
            return Ok(IngestOutcome {
                interaction: existing.clone(),
                is_new: false,
            });
        }

        let interaction = InteractionRecord {
            cid: message.cid.clone(),
            conversation_id: ConversationId::from(group),
            interaction_type: app.kind,
            payload: app.payload.into_bytes(),
            sent_date_ms: app.sent_date_ms,
            is_mine,
        };
        interactions.insert(message.cid.clone(), interaction.clone());
        debug!(
            cid = %message.cid,
            conversation = %interaction.conversation_id,
            "recorded out-of-store message"
        );

        Ok(IngestOutcome {
            interaction,
            is_new: true,
        })
    }
}
