//! Push cryptography effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Collaborator Effect
//! - **Implementation**: `herald-effects` (`SealedPushDecryptor`), test doubles in `herald-testkit`
//! - **Usage**: `herald-push` stage 1 (decrypt)

use crate::context::ReceiveContext;
use crate::types::DecryptedPushData;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Unwraps an opaque encrypted push payload into structured protocol data
#[async_trait]
pub trait PushDecryptor: Send + Sync {
    /// Decrypt `input`, extracting group identity, envelope and cleartext.
    ///
    /// The payload format belongs to the implementation; callers forward it untouched.
    async fn decrypt(&self, ctx: &ReceiveContext, input: &[u8]) -> Result<DecryptedPushData>;
}

/// Blanket implementation for Arc<T> where T: PushDecryptor
#[async_trait]
impl<T: PushDecryptor + ?Sized> PushDecryptor for Arc<T> {
    async fn decrypt(&self, ctx: &ReceiveContext, input: &[u8]) -> Result<DecryptedPushData> {
        (**self).decrypt(ctx, input).await
    }
}
