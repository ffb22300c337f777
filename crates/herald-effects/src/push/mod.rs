//! Push payload decryption handlers

pub mod sealed;

pub use sealed::{
    seal_push, seal_push_with_nonce, PushEnvelope, PushKey, SealedPush, SealedPushDecryptor,
};
