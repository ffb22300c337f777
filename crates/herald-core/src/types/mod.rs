//! Domain data types shared by collaborators and the orchestrator

pub mod push;

pub use push::{
    AccountPreferences, DecryptedPushData, IngestOutcome, InteractionRecord, InteractionType,
    MuteStatus, OutOfStoreMessage,
};
