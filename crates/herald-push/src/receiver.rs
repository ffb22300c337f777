//! Push Receiver - push payload to notification decision
//!
//! Flow:
//! 1. Decrypt the opaque payload (fatal on error)
//! 2. Ingest the out-of-store message to learn novelty (fatal on error)
//! 3. Look up mute status for the conversation (errors silence everything)
//! 4. Look up account preferences (errors hide previews)
//! 5. Assemble the [`NotificationDecision`]
//!
//! Every collaborator call is bounded by the request's [`ReceiveContext`], so a
//! cancelled or expired request fails its current stage promptly. For stages 3
//! and 4 that failure is absorbed like any other lookup error.

use crate::decision::NotificationDecision;
use crate::errors::{PushReceiveError, ReceiveStage};
use crate::policy::{resolve_already_received, resolve_mute_status, resolve_preview_visibility};
use async_trait::async_trait;
use herald_core::{
    EventIngestor, HeraldError, IngestOutcome, PreferenceStore, PushDecryptor, ReceiveContext,
    ReceiverConfig,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Entry point used by the platform push integration, once per push event
#[async_trait]
pub trait MessengerPushReceiver: Send + Sync {
    /// Turn an encrypted push payload into a notification decision
    async fn push_receive(
        &self,
        ctx: &ReceiveContext,
        input: &[u8],
    ) -> Result<NotificationDecision, PushReceiveError>;
}

/// Stateless push receive orchestrator
///
/// Holds only shared references to its collaborators, so one receiver can serve
/// any number of concurrent requests.
#[derive(Clone)]
pub struct PushReceiver {
    decryptor: Arc<dyn PushDecryptor>,
    ingestor: Arc<dyn EventIngestor>,
    preferences: Arc<dyn PreferenceStore>,
    config: ReceiverConfig,
}

impl PushReceiver {
    /// Create a receiver with the default configuration
    pub fn new(
        decryptor: Arc<dyn PushDecryptor>,
        ingestor: Arc<dyn EventIngestor>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            decryptor,
            ingestor,
            preferences,
            config: ReceiverConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ReceiverConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Receive a payload under a context built from the configured default deadline
    pub async fn receive_with_defaults(
        &self,
        input: &[u8],
    ) -> Result<NotificationDecision, PushReceiveError> {
        let ctx = ReceiveContext::from_config(&self.config);
        self.receive(&ctx, input).await
    }

    /// Decrypt, ingest and resolve preferences for one push payload
    ///
    /// # Errors
    /// * `PushReceiveError::Internal` with stage `Decrypt` if decryption fails;
    ///   ingestion is not attempted
    /// * `PushReceiveError::Internal` with stage `Ingest` if ingestion fails
    ///
    /// Mute and preference lookup failures never fail the receive.
    #[instrument(
        name = "push_receive",
        skip_all,
        fields(request_id = %ctx.request_id(), payload_len = input.len())
    )]
    pub async fn receive(
        &self,
        ctx: &ReceiveContext,
        input: &[u8],
    ) -> Result<NotificationDecision, PushReceiveError> {
        debug!(stage = %ReceiveStage::Decrypt, "decrypting push payload");
        let protocol_data = ctx
            .bound(self.decryptor.decrypt(ctx, input))
            .await
            .map_err(|err| Self::fatal(ReceiveStage::Decrypt, err))?;

        debug!(
            stage = %ReceiveStage::Ingest,
            group = %protocol_data.group_public_key,
            cid = %protocol_data.message.cid,
            cleartext_len = protocol_data.cleartext.len(),
            "ingesting out-of-store message"
        );
        let IngestOutcome {
            interaction,
            is_new,
        } = ctx
            .bound(self.ingestor.ingest_out_of_store_message(
                &protocol_data.group_public_key,
                &protocol_data.message,
                &protocol_data.cleartext,
            ))
            .await
            .map_err(|err| Self::fatal(ReceiveStage::Ingest, err))?;

        let mute = resolve_mute_status(self.absorb(
            "mute_status",
            ctx.bound(self.preferences.get_mute_status(&interaction.conversation_id))
                .await,
        ));

        let preview = resolve_preview_visibility(self.absorb(
            "account_preferences",
            ctx.bound(self.preferences.get_account_preferences()).await,
        ));

        let decision = NotificationDecision {
            already_received: resolve_already_received(protocol_data.already_received, is_new),
            conversation_muted: mute.conversation_muted,
            account_muted: mute.account_muted,
            hide_preview: preview.is_hidden(),
            protocol_data,
            interaction,
        };

        debug!(
            conversation = %decision.interaction.conversation_id,
            already_received = decision.already_received,
            account_muted = decision.account_muted,
            conversation_muted = decision.conversation_muted,
            hide_preview = decision.hide_preview,
            "push receive decided"
        );

        Ok(decision)
    }

    fn fatal(stage: ReceiveStage, err: HeraldError) -> PushReceiveError {
        warn!(%stage, error = %err, "push receive failed");
        PushReceiveError::internal(stage, err)
    }

    /// Log a lookup failure that is about to be replaced by a fail-safe default
    fn absorb<T>(
        &self,
        lookup: &'static str,
        result: herald_core::Result<T>,
    ) -> herald_core::Result<T> {
        if let Err(err) = &result {
            if self.config.log_degraded_lookups {
                warn!(lookup, error = %err, "lookup failed, applying fail-safe default");
            } else {
                debug!(lookup, error = %err, "lookup failed, applying fail-safe default");
            }
        }
        result
    }
}

impl std::fmt::Debug for PushReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushReceiver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessengerPushReceiver for PushReceiver {
    async fn push_receive(
        &self,
        ctx: &ReceiveContext,
        input: &[u8],
    ) -> Result<NotificationDecision, PushReceiveError> {
        self.receive(ctx, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_testkit::{fixtures, ScriptedDecryptor, ScriptedIngestor, ScriptedPreferenceStore};

    #[tokio::test]
    async fn usable_through_trait_object() {
        let receiver: Arc<dyn MessengerPushReceiver> = Arc::new(PushReceiver::new(
            Arc::new(ScriptedDecryptor::succeeding(fixtures::decrypted_push(false))),
            Arc::new(ScriptedIngestor::succeeding(fixtures::ingest_outcome(true))),
            Arc::new(ScriptedPreferenceStore::visible_unmuted()),
        ));

        let decision = receiver
            .push_receive(&ReceiveContext::new(), b"payload")
            .await
            .unwrap();
        assert!(decision.should_alert());
    }

    #[tokio::test]
    async fn default_context_uses_configured_deadline() {
        let receiver = PushReceiver::new(
            Arc::new(ScriptedDecryptor::hanging()),
            Arc::new(ScriptedIngestor::succeeding(fixtures::ingest_outcome(true))),
            Arc::new(ScriptedPreferenceStore::visible_unmuted()),
        )
        .with_config(ReceiverConfig {
            default_timeout_ms: Some(20),
            ..ReceiverConfig::default()
        });

        let err = receiver.receive_with_defaults(b"payload").await.unwrap_err();
        assert_eq!(err.stage(), ReceiveStage::Decrypt);
        assert_eq!(err.cause(), &HeraldError::Timeout { timeout_ms: 20 });
    }
}
