//! Herald Push - Push Receive Orchestration
//!
//! Turns an opaque encrypted push payload into a de-duplicated, privacy-respecting
//! [`NotificationDecision`]. The [`PushReceiver`] composes three collaborators from
//! `herald-core` (decryptor, ingestor, preference store) in a fixed sequence and
//! applies the fail-toward-privacy policy from [`policy`] whenever a lookup fails.
//!
//! # Example
//!
//! ```ignore
//! let receiver = PushReceiver::new(decryptor, ingestor, preferences);
//! let decision = receiver.receive(&ReceiveContext::new(), &payload).await?;
//! if decision.should_alert() {
//!     show(decision.presentation(receiver.config()));
//! }
//! ```

#![forbid(unsafe_code)]

pub mod decision;
pub mod errors;
pub mod policy;
pub mod presentation;
pub mod receiver;

pub use decision::NotificationDecision;
pub use errors::{PushReceiveError, ReceiveStage};
pub use policy::{
    resolve_already_received, resolve_mute_status, resolve_preview_visibility, PreviewVisibility,
};
pub use presentation::NotificationPresentation;
pub use receiver::{MessengerPushReceiver, PushReceiver};
