//! Pure effect interfaces (no implementations)
//!
//! The push receive orchestration is composed from three collaborators, each
//! expressed as an async trait so handlers can be swapped per deployment and
//! per test:
//!
//! - [`PushDecryptor`]: push cryptography
//! - [`EventIngestor`]: durable, de-duplicated message recording
//! - [`PreferenceStore`]: mute status and account preferences
//!
//! [`CancellationToken`] carries cooperative cancellation through
//! [`ReceiveContext`](crate::context::ReceiveContext).

pub mod ingest;
pub mod preferences;
pub mod push;
pub mod task;

pub use ingest::EventIngestor;
pub use preferences::PreferenceStore;
pub use push::PushDecryptor;
pub use task::{CancelSignal, CancellationToken, NeverCancel};
