//! Herald Testing Infrastructure
//!
//! Substitute collaborators and fixtures for exercising the push receive
//! orchestration one stage at a time.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! herald-testkit = { path = "../herald-testkit" }
//! ```
//!
//! ```rust,ignore
//! use herald_testkit::*;
//!
//! let decryptor = ScriptedDecryptor::succeeding(fixtures::decrypted_push(false));
//! let ingestor = ScriptedIngestor::failing(HeraldError::storage("offline"));
//! let preferences = ScriptedPreferenceStore::visible_unmuted()
//!     .with_mute(StageScript::Hang);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod logging;
pub mod scripted;
pub mod strategies;

pub use logging::init_tracing;
pub use scripted::{
    IngestCall, ScriptedDecryptor, ScriptedIngestor, ScriptedPreferenceStore, StageScript,
};
