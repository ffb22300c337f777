//! Scripted collaborator doubles
//!
//! Each double answers from a [`StageScript`]: succeed with a value, fail with an
//! error, or hang forever (to exercise context deadlines and cancellation). Every
//! double counts its calls and remembers its last arguments so tests can assert
//! which stages ran.
//!
//! # Blocking Lock Usage
//!
//! Uses `std::sync::Mutex`; locks are never held across an await point.

use async_trait::async_trait;
use herald_core::{
    AccountPreferences, ConversationId, DecryptedPushData, EventIngestor, GroupPublicKey,
    HeraldError, IngestOutcome, MuteStatus, OutOfStoreMessage, PreferenceStore, PushDecryptor,
    ReceiveContext, Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted behavior of one collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageScript<T> {
    /// Return the value
    Succeed(T),
    /// Return the error
    Fail(HeraldError),
    /// Never complete
    Hang,
}

impl<T: Clone> StageScript<T> {
    async fn play(&self) -> Result<T> {
        match self {
            Self::Succeed(value) => Ok(value.clone()),
            Self::Fail(err) => Err(err.clone()),
            Self::Hang => std::future::pending().await,
        }
    }
}

fn snapshot<T: Clone>(slot: &Mutex<T>) -> T {
    slot.lock().unwrap().clone()
}

fn replace<T>(slot: &Mutex<T>, value: T) {
    *slot.lock().unwrap() = value;
}

/// Scripted [`PushDecryptor`]
#[derive(Debug)]
pub struct ScriptedDecryptor {
    script: Mutex<StageScript<DecryptedPushData>>,
    calls: AtomicUsize,
    last_input: Mutex<Option<Vec<u8>>>,
}

impl ScriptedDecryptor {
    /// Double following `script`
    pub fn new(script: StageScript<DecryptedPushData>) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Always decrypts to `data`
    pub fn succeeding(data: DecryptedPushData) -> Self {
        Self::new(StageScript::Succeed(data))
    }

    /// Always fails with `err`
    pub fn failing(err: HeraldError) -> Self {
        Self::new(StageScript::Fail(err))
    }

    /// Never completes
    pub fn hanging() -> Self {
        Self::new(StageScript::Hang)
    }

    /// Change the script for subsequent calls
    pub fn set_script(&self, script: StageScript<DecryptedPushData>) {
        replace(&self.script, script);
    }

    /// Number of decrypt calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Payload passed to the last call
    pub fn last_input(&self) -> Option<Vec<u8>> {
        snapshot(&self.last_input)
    }
}

#[async_trait]
impl PushDecryptor for ScriptedDecryptor {
    async fn decrypt(&self, _ctx: &ReceiveContext, input: &[u8]) -> Result<DecryptedPushData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        replace(&self.last_input, Some(input.to_vec()));
        let script = snapshot(&self.script);
        script.play().await
    }
}

/// Arguments of one ingest call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestCall {
    /// Group the message was addressed to
    pub group: GroupPublicKey,
    /// Message envelope
    pub message: OutOfStoreMessage,
    /// Decrypted payload
    pub cleartext: Vec<u8>,
}

/// Scripted [`EventIngestor`]
#[derive(Debug)]
pub struct ScriptedIngestor {
    script: Mutex<StageScript<IngestOutcome>>,
    calls: AtomicUsize,
    last_call: Mutex<Option<IngestCall>>,
}

impl ScriptedIngestor {
    /// Double following `script`
    pub fn new(script: StageScript<IngestOutcome>) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Always returns `outcome`
    pub fn succeeding(outcome: IngestOutcome) -> Self {
        Self::new(StageScript::Succeed(outcome))
    }

    /// Always fails with `err`
    pub fn failing(err: HeraldError) -> Self {
        Self::new(StageScript::Fail(err))
    }

    /// Never completes
    pub fn hanging() -> Self {
        Self::new(StageScript::Hang)
    }

    /// Change the script for subsequent calls
    pub fn set_script(&self, script: StageScript<IngestOutcome>) {
        replace(&self.script, script);
    }

    /// Number of ingest calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of the last call
    pub fn last_call(&self) -> Option<IngestCall> {
        snapshot(&self.last_call)
    }
}

#[async_trait]
impl EventIngestor for ScriptedIngestor {
    async fn ingest_out_of_store_message(
        &self,
        group: &GroupPublicKey,
        message: &OutOfStoreMessage,
        cleartext: &[u8],
    ) -> Result<IngestOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        replace(
            &self.last_call,
            Some(IngestCall {
                group: group.clone(),
                message: message.clone(),
                cleartext: cleartext.to_vec(),
            }),
        );
        let script = snapshot(&self.script);
        script.play().await
    }
}

/// Scripted [`PreferenceStore`] with independent scripts per lookup
#[derive(Debug)]
pub struct ScriptedPreferenceStore {
    mute: Mutex<StageScript<MuteStatus>>,
    preferences: Mutex<StageScript<AccountPreferences>>,
    mute_calls: AtomicUsize,
    preference_calls: AtomicUsize,
    last_conversation: Mutex<Option<ConversationId>>,
}

impl ScriptedPreferenceStore {
    /// Double following the two scripts
    pub fn new(
        mute: StageScript<MuteStatus>,
        preferences: StageScript<AccountPreferences>,
    ) -> Self {
        Self {
            mute: Mutex::new(mute),
            preferences: Mutex::new(preferences),
            mute_calls: AtomicUsize::new(0),
            preference_calls: AtomicUsize::new(0),
            last_conversation: Mutex::new(None),
        }
    }

    /// Nothing muted, previews explicitly visible
    pub fn visible_unmuted() -> Self {
        Self::new(
            StageScript::Succeed(MuteStatus::default()),
            StageScript::Succeed(AccountPreferences::previews_visible()),
        )
    }

    /// Replace the mute script
    pub fn with_mute(self, script: StageScript<MuteStatus>) -> Self {
        replace(&self.mute, script);
        self
    }

    /// Replace the account preference script
    pub fn with_preferences(self, script: StageScript<AccountPreferences>) -> Self {
        replace(&self.preferences, script);
        self
    }

    /// Number of mute lookups so far
    pub fn mute_calls(&self) -> usize {
        self.mute_calls.load(Ordering::SeqCst)
    }

    /// Number of account preference lookups so far
    pub fn preference_calls(&self) -> usize {
        self.preference_calls.load(Ordering::SeqCst)
    }

    /// Conversation passed to the last mute lookup
    pub fn last_conversation(&self) -> Option<ConversationId> {
        snapshot(&self.last_conversation)
    }
}

#[async_trait]
impl PreferenceStore for ScriptedPreferenceStore {
    async fn get_mute_status(&self, conversation: &ConversationId) -> Result<MuteStatus> {
        self.mute_calls.fetch_add(1, Ordering::SeqCst);
        replace(&self.last_conversation, Some(conversation.clone()));
        let script = snapshot(&self.mute);
        script.play().await
    }

    async fn get_account_preferences(&self) -> Result<AccountPreferences> {
        self.preference_calls.fetch_add(1, Ordering::SeqCst);
        let script = snapshot(&self.preferences);
        script.play().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn decryptor_records_calls_and_input() {
        let decryptor = ScriptedDecryptor::failing(HeraldError::crypto("bad key"));
        let err = decryptor
            .decrypt(&ReceiveContext::new(), b"blob")
            .await
            .unwrap_err();

        assert_eq!(err, HeraldError::crypto("bad key"));
        assert_eq!(decryptor.calls(), 1);
        assert_eq!(decryptor.last_input().as_deref(), Some(&b"blob"[..]));
    }

    #[tokio::test]
    async fn scripts_can_change_between_calls() {
        let ingestor = ScriptedIngestor::failing(HeraldError::storage("busy"));
        let data = fixtures::decrypted_push(false);
        assert!(ingestor
            .ingest_out_of_store_message(&data.group_public_key, &data.message, &data.cleartext)
            .await
            .is_err());

        ingestor.set_script(StageScript::Succeed(fixtures::ingest_outcome(true)));
        let outcome = ingestor
            .ingest_out_of_store_message(&data.group_public_key, &data.message, &data.cleartext)
            .await
            .unwrap();

        assert!(outcome.is_new);
        assert_eq!(ingestor.calls(), 2);
        assert_eq!(ingestor.last_call().unwrap().cleartext, data.cleartext);
    }
}
