//! Notification preference effect interface
//!
//! # Effect Classification
//!
//! - **Category**: Collaborator Effect
//! - **Implementation**: `herald-effects` (`MemoryPreferenceStore`), test doubles in `herald-testkit`
//! - **Usage**: `herald-push` stages 3 and 4 (mute and preview lookups)

use crate::identifiers::ConversationId;
use crate::types::{AccountPreferences, MuteStatus};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads mute status and account-level notification preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Account and conversation mute flags for `conversation`
    async fn get_mute_status(&self, conversation: &ConversationId) -> Result<MuteStatus>;

    /// Account-level notification preferences
    async fn get_account_preferences(&self) -> Result<AccountPreferences>;
}

/// Blanket implementation for Arc<T> where T: PreferenceStore
#[async_trait]
impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    async fn get_mute_status(&self, conversation: &ConversationId) -> Result<MuteStatus> {
        (**self).get_mute_status(conversation).await
    }

    async fn get_account_preferences(&self) -> Result<AccountPreferences> {
        (**self).get_account_preferences().await
    }
}
