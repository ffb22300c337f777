//! Herald Core - Push Receive Interface Layer
//!
//! This crate provides the foundational types and effect interfaces that the
//! push receive orchestration is built from. It contains no orchestration logic
//! and no handler implementations.
//!
//! # Contents
//!
//! - [`errors`]: the unified [`HeraldError`] reported by every collaborator
//! - [`identifiers`]: byte identifiers for groups, conversations, messages, devices
//! - [`types`]: decrypted push data, interaction records, mute status, preferences
//! - [`context`]: [`ReceiveContext`], carrying cancellation and deadline per request
//! - [`effects`]: collaborator contracts ([`PushDecryptor`], [`EventIngestor`],
//!   [`PreferenceStore`]) and cancellation tokens
//! - [`config`]: layered configuration ([`HeraldConfig`], [`ReceiverConfig`])

#![forbid(unsafe_code)]

/// Layered configuration
pub mod config;

/// Request context (cancellation, deadline, correlation)
pub mod context;

/// Collaborator effect interfaces
pub mod effects;

/// Unified error handling
pub mod errors;

/// Group, conversation, message and request identifiers
pub mod identifiers;

/// Push receive data model
pub mod types;

// === Public API Re-exports ===

pub use config::{HeraldConfig, ReceiverConfig};
pub use context::ReceiveContext;
pub use effects::{
    CancelSignal, CancellationToken, EventIngestor, NeverCancel, PreferenceStore, PushDecryptor,
};
pub use errors::{HeraldError, Result};
pub use identifiers::{ConversationId, DevicePublicKey, GroupPublicKey, MessageCid, RequestId};
pub use types::{
    AccountPreferences, DecryptedPushData, IngestOutcome, InteractionRecord, InteractionType,
    MuteStatus, OutOfStoreMessage,
};
