//! Push receive through the reference handlers
//!
//! Seals a push the way a sender would, then drives it through a
//! [`PushReceiver`] wired to the sealed decryptor and the in-memory stores.

#![allow(clippy::unwrap_used)]

use herald_core::{
    AccountPreferences, ConversationId, HeraldError, InteractionType, ReceiveContext,
    ReceiverConfig,
};
use herald_effects::{
    seal_push, AppMessage, MemoryEventIngestor, MemoryPreferenceStore, PushEnvelope, PushKey,
    SealedPushDecryptor,
};
use herald_push::{PushReceiver, ReceiveStage};
use herald_testkit::{fixtures, init_tracing, ScriptedIngestor, StageScript};
use std::sync::Arc;

struct Device {
    key: PushKey,
    ingestor: MemoryEventIngestor,
    preferences: MemoryPreferenceStore,
    receiver: PushReceiver,
}

impl Device {
    fn new(preferences: MemoryPreferenceStore) -> Self {
        init_tracing();
        let key = PushKey::generate();
        let ingestor = MemoryEventIngestor::new();
        let receiver = PushReceiver::new(
            Arc::new(SealedPushDecryptor::new(key.clone()).with_ingest_log(ingestor.clone())),
            Arc::new(ingestor.clone()),
            Arc::new(preferences.clone()),
        );
        Self {
            key,
            ingestor,
            preferences,
            receiver,
        }
    }

    fn seal(&self, counter: u64, app: &AppMessage) -> Vec<u8> {
        let envelope = PushEnvelope {
            group_public_key: fixtures::group_key(1),
            message: fixtures::out_of_store_message(counter),
            cleartext: app.encode().unwrap(),
        };
        seal_push(&self.key, &envelope).unwrap()
    }
}

#[tokio::test]
async fn fresh_push_renders_its_text() {
    let device = Device::new(MemoryPreferenceStore::with_account(
        AccountPreferences::previews_visible(),
    ));
    let payload = device.seal(1, &AppMessage::user_message("lunch?", 1_000));

    let decision = device
        .receiver
        .receive(&ReceiveContext::new(), &payload)
        .await
        .unwrap();

    assert!(!decision.already_received);
    assert_eq!(decision.interaction.interaction_type, InteractionType::UserMessage);
    assert_eq!(
        decision.interaction.conversation_id,
        ConversationId::from(&fixtures::group_key(1))
    );

    let shown = decision.presentation(&ReceiverConfig::default());
    assert_eq!(shown.body.as_deref(), Some("lunch?"));
    assert!(shown.audible);
    assert_eq!(device.ingestor.len().await, 1);
}

#[tokio::test]
async fn redelivered_push_is_already_received() {
    let device = Device::new(MemoryPreferenceStore::with_account(
        AccountPreferences::previews_visible(),
    ));
    let payload = device.seal(2, &AppMessage::user_message("again", 1_000));
    let ctx = ReceiveContext::new();

    let first = device.receiver.receive(&ctx, &payload).await.unwrap();
    let second = device.receiver.receive(&ctx, &payload).await.unwrap();

    assert!(!first.already_received);
    assert!(second.already_received);
    assert!(second.presentation(&ReceiverConfig::default()).suppressed);
    assert_eq!(device.ingestor.len().await, 1);
}

#[tokio::test]
async fn muted_conversation_and_missing_account() {
    let device = Device::new(MemoryPreferenceStore::new());
    device
        .preferences
        .set_conversation_muted(ConversationId::from(&fixtures::group_key(1)), true)
        .await;
    let payload = device.seal(3, &AppMessage::user_message("quiet", 1_000));

    let decision = device
        .receiver
        .receive(&ReceiveContext::new(), &payload)
        .await
        .unwrap();

    assert!(decision.conversation_muted);
    assert!(!decision.account_muted);
    assert!(decision.hide_preview);

    let config = ReceiverConfig::default();
    let shown = decision.presentation(&config);
    assert!(!shown.audible);
    assert_eq!(shown.body.as_deref(), Some(config.hidden_preview_body.as_str()));
}

#[tokio::test]
async fn tampered_push_fails_before_ingest() {
    let device = Device::new(MemoryPreferenceStore::new());
    let mut payload = device.seal(4, &AppMessage::user_message("tamper", 1_000));
    let last = payload.len() - 1;
    payload[last] ^= 0x01;

    let err = device
        .receiver
        .receive(&ReceiveContext::new(), &payload)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), ReceiveStage::Decrypt);
    assert!(matches!(err.cause(), HeraldError::Crypto { .. }));
    assert!(device.ingestor.is_empty().await);
}

#[tokio::test]
async fn undecodable_cleartext_fails_at_ingest() {
    let device = Device::new(MemoryPreferenceStore::new());
    let envelope = PushEnvelope {
        group_public_key: fixtures::group_key(1),
        message: fixtures::out_of_store_message(5),
        cleartext: b"\x00binary".to_vec(),
    };
    let payload = seal_push(&device.key, &envelope).unwrap();

    let err = device
        .receiver
        .receive(&ReceiveContext::new(), &payload)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), ReceiveStage::Ingest);
    assert!(matches!(err.cause(), HeraldError::Serialization { .. }));
}

#[tokio::test]
async fn redelivery_after_failed_ingest_still_notifies() {
    init_tracing();
    let key = PushKey::generate();
    let log = MemoryEventIngestor::new();
    let ingestor = Arc::new(ScriptedIngestor::failing(HeraldError::storage("db locked")));
    let receiver = PushReceiver::new(
        Arc::new(SealedPushDecryptor::new(key.clone()).with_ingest_log(log)),
        Arc::clone(&ingestor) as _,
        Arc::new(MemoryPreferenceStore::with_account(
            AccountPreferences::previews_visible(),
        )),
    );
    let envelope = PushEnvelope {
        group_public_key: fixtures::group_key(1),
        message: fixtures::out_of_store_message(6),
        cleartext: AppMessage::user_message("retry", 1_000).encode().unwrap(),
    };
    let payload = seal_push(&key, &envelope).unwrap();
    let ctx = ReceiveContext::new();

    let err = receiver.receive(&ctx, &payload).await.unwrap_err();
    assert_eq!(err.stage(), ReceiveStage::Ingest);

    ingestor.set_script(StageScript::Succeed(fixtures::ingest_outcome(true)));
    let decision = receiver.receive(&ctx, &payload).await.unwrap();

    assert!(!decision.already_received);
    assert!(decision.should_alert());
}
