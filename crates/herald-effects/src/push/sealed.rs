//! Sealed push decryption
//!
//! A sealed push is a bincode [`SealedPush`] whose ciphertext is a bincode
//! [`PushEnvelope`] encrypted with ChaCha20-Poly1305 under the device push key.
//! When attached to an ingest log, the decryptor reports `already_received` for
//! messages the log has already recorded. It never records anything itself, so a
//! push whose ingestion failed is still new when it is delivered again.

use crate::ingest::MemoryEventIngestor;
use async_trait::async_trait;
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use herald_core::{
    DecryptedPushData, GroupPublicKey, HeraldError, OutOfStoreMessage, PushDecryptor,
    ReceiveContext, Result,
};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key shared between the push sender and this device
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PushKey([u8; 32]);

impl PushKey {
    /// Wrap raw key bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Fresh random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new((&self.0).into())
    }
}

impl fmt::Debug for PushKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushKey(<redacted>)")
    }
}

/// Wire form of a sealed push payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedPush {
    /// 12-byte nonce for ChaCha20Poly1305
    pub nonce: [u8; 12],
    /// Encrypted [`PushEnvelope`] with authentication tag
    pub ciphertext: Vec<u8>,
}

/// Plaintext carried inside a [`SealedPush`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEnvelope {
    /// Group the message was addressed to
    pub group_public_key: GroupPublicKey,
    /// Out-of-store message envelope
    pub message: OutOfStoreMessage,
    /// Application payload
    pub cleartext: Vec<u8>,
}

/// Seal an envelope with a random nonce
pub fn seal_push(key: &PushKey, envelope: &PushEnvelope) -> Result<Vec<u8>> {
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    seal_push_with_nonce(key, nonce.into(), envelope)
}

/// Seal an envelope with a caller-chosen nonce
///
/// Reusing a nonce under the same key breaks confidentiality; this exists for
/// deterministic test vectors.
pub fn seal_push_with_nonce(
    key: &PushKey,
    nonce: [u8; 12],
    envelope: &PushEnvelope,
) -> Result<Vec<u8>> {
    let plaintext = bincode::serialize(envelope).map_err(|e| {
        HeraldError::serialization(format!("Push envelope serialization failed: {e}"))
    })?;

    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_ref())
        .map_err(|e| HeraldError::crypto(format!("Push encryption failed: {e}")))?;

    bincode::serialize(&SealedPush { nonce, ciphertext })
        .map_err(|e| HeraldError::serialization(format!("Sealed push serialization failed: {e}")))
}

/// [`PushDecryptor`] for sealed push payloads
pub struct SealedPushDecryptor {
    key: PushKey,
    ingest_log: Option<MemoryEventIngestor>,
}

impl SealedPushDecryptor {
    /// Decryptor for payloads sealed under `key`
    pub fn new(key: PushKey) -> Self {
        Self {
            key,
            ingest_log: None,
        }
    }

    /// Report `already_received` for messages `log` has recorded
    pub fn with_ingest_log(mut self, log: MemoryEventIngestor) -> Self {
        self.ingest_log = Some(log);
        self
    }

    fn open(&self, input: &[u8]) -> Result<PushEnvelope> {
        let sealed: SealedPush = bincode::deserialize(input)
            .map_err(|e| HeraldError::serialization(format!("Malformed sealed push: {e}")))?;

        let plaintext = self
            .key
            .cipher()
            .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_ref())
            .map_err(|e| HeraldError::crypto(format!("Push decryption failed: {e}")))?;

        bincode::deserialize(&plaintext).map_err(|e| {
            HeraldError::serialization(format!("Push envelope deserialization failed: {e}"))
        })
    }
}

impl fmt::Debug for SealedPushDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedPushDecryptor").finish_non_exhaustive()
    }
}

#[async_trait]
impl PushDecryptor for SealedPushDecryptor {
    async fn decrypt(&self, ctx: &ReceiveContext, input: &[u8]) -> Result<DecryptedPushData> {
        if ctx.is_cancelled() {
            return Err(HeraldError::cancelled("push decryption cancelled"));
        }

        let PushEnvelope {
            group_public_key,
            message,
            cleartext,
        } = self.open(input)?;

        let already_received = match &self.ingest_log {
            Some(log) => log.interaction(&message.cid).await.is_some(),
            None => false,
        };
        debug!(
            group = %group_public_key,
            cid = %message.cid,
            already_received,
            "opened sealed push"
        );

        Ok(DecryptedPushData {
            group_public_key,
            message,
            cleartext,
            already_received,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{CancelSignal, EventIngestor};
    use herald_testkit::fixtures;
    use std::sync::Arc;

    fn envelope() -> PushEnvelope {
        let pushed = fixtures::decrypted_push(false);
        PushEnvelope {
            group_public_key: pushed.group_public_key,
            message: pushed.message,
            cleartext: pushed.cleartext,
        }
    }

    #[tokio::test]
    async fn opens_what_was_sealed() {
        let key = PushKey::generate();
        let sealed = seal_push(&key, &envelope()).unwrap();

        let decryptor = SealedPushDecryptor::new(key);
        let data = decryptor
            .decrypt(&ReceiveContext::new(), &sealed)
            .await
            .unwrap();

        assert_eq!(data.group_public_key, envelope().group_public_key);
        assert_eq!(data.message, envelope().message);
        assert_eq!(data.cleartext, fixtures::SAMPLE_CLEARTEXT);
        assert!(!data.already_received);
    }

    #[tokio::test]
    async fn delivery_recorded_by_log_is_already_received() {
        let key = PushKey::from_bytes([7u8; 32]);
        let first = seal_push_with_nonce(&key, [1u8; 12], &envelope()).unwrap();
        let second = seal_push_with_nonce(&key, [2u8; 12], &envelope()).unwrap();

        let log = MemoryEventIngestor::new();
        let decryptor = SealedPushDecryptor::new(key).with_ingest_log(log.clone());
        let ctx = ReceiveContext::new();

        let opened = decryptor.decrypt(&ctx, &first).await.unwrap();
        assert!(!opened.already_received);

        // Opening alone records nothing
        assert!(!decryptor.decrypt(&ctx, &first).await.unwrap().already_received);

        log.ingest_out_of_store_message(
            &opened.group_public_key,
            &opened.message,
            &crate::AppMessage::user_message("hi", 1).encode().unwrap(),
        )
        .await
        .unwrap();
        assert!(decryptor.decrypt(&ctx, &second).await.unwrap().already_received);
    }

    #[tokio::test]
    async fn without_log_every_delivery_is_fresh() {
        let key = PushKey::generate();
        let sealed = seal_push(&key, &envelope()).unwrap();
        let decryptor = SealedPushDecryptor::new(key);
        let ctx = ReceiveContext::new();

        for _ in 0..2 {
            assert!(!decryptor.decrypt(&ctx, &sealed).await.unwrap().already_received);
        }
    }

    #[tokio::test]
    async fn wrong_key_is_a_crypto_error() {
        let sealed = seal_push(&PushKey::from_bytes([1u8; 32]), &envelope()).unwrap();
        let decryptor = SealedPushDecryptor::new(PushKey::from_bytes([2u8; 32]));

        let err = decryptor
            .decrypt(&ReceiveContext::new(), &sealed)
            .await
            .unwrap_err();
        assert!(matches!(err, HeraldError::Crypto { .. }));
    }

    #[tokio::test]
    async fn garbage_is_a_serialization_error() {
        let decryptor = SealedPushDecryptor::new(PushKey::generate());
        let err = decryptor
            .decrypt(&ReceiveContext::new(), &[0xff, 0x01])
            .await
            .unwrap_err();
        assert!(matches!(err, HeraldError::Serialization { .. }));
    }

    #[tokio::test]
    async fn cancelled_context_is_rejected() {
        let key = PushKey::generate();
        let sealed = seal_push(&key, &envelope()).unwrap();
        let signal = Arc::new(CancelSignal::new());
        signal.cancel();

        let err = SealedPushDecryptor::new(key)
            .decrypt(&ReceiveContext::new().with_cancellation(signal), &sealed)
            .await
            .unwrap_err();
        assert!(matches!(err, HeraldError::Cancelled { .. }));
    }

    #[test]
    fn key_debug_is_redacted() {
        let rendered = format!("{:?}", PushKey::from_bytes([9u8; 32]));
        assert_eq!(rendered, "PushKey(<redacted>)");
    }
}
