//! Herald Effects - Reference Collaborator Handlers
//!
//! Concrete implementations of the `herald-core` collaborator traits:
//!
//! - [`SealedPushDecryptor`]: ChaCha20-Poly1305 sealed push payloads with replay detection
//! - [`MemoryEventIngestor`]: at-most-once interaction recording keyed by message cid
//! - [`MemoryPreferenceStore`]: mute flags and account preferences
//!
//! The wire and storage formats here belong to these handlers only; the push
//! receive orchestration never depends on them.

#![forbid(unsafe_code)]

pub mod ingest;
pub mod preferences;
pub mod push;

pub use ingest::{AppMessage, MemoryEventIngestor};
pub use preferences::MemoryPreferenceStore;
pub use push::{
    seal_push, seal_push_with_nonce, PushEnvelope, PushKey, SealedPush, SealedPushDecryptor,
};
