//! In-memory preference store

use async_trait::async_trait;
use herald_core::{
    AccountPreferences, ConversationId, HeraldError, MuteStatus, PreferenceStore, Result,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct PreferenceState {
    account_muted: bool,
    muted_conversations: HashSet<ConversationId>,
    account: Option<AccountPreferences>,
}

/// In-memory [`PreferenceStore`]
///
/// Starts without an account, so preference lookups fail with `NotFound` until
/// [`set_account_preferences`](Self::set_account_preferences) is called.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    state: Arc<RwLock<PreferenceState>>,
}

impl MemoryPreferenceStore {
    /// Create a store with no account and nothing muted
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store for an account with `preferences`
    pub fn with_account(preferences: AccountPreferences) -> Self {
        Self {
            state: Arc::new(RwLock::new(PreferenceState {
                account: Some(preferences),
                ..PreferenceState::default()
            })),
        }
    }

    /// Mute or unmute the whole account
    pub async fn set_account_muted(&self, muted: bool) {
        self.state.write().await.account_muted = muted;
    }

    /// Mute or unmute one conversation
    pub async fn set_conversation_muted(&self, conversation: ConversationId, muted: bool) {
        let mut state = self.state.write().await;
        if muted {
            state.muted_conversations.insert(conversation);
        } else {
            state.muted_conversations.remove(&conversation);
        }
    }

    /// Replace the account preferences
    pub async fn set_account_preferences(&self, preferences: AccountPreferences) {
        self.state.write().await.account = Some(preferences);
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get_mute_status(&self, conversation: &ConversationId) -> Result<MuteStatus> {
        let state = self.state.read().await;
        Ok(MuteStatus {
            account_muted: state.account_muted,
            conversation_muted: state.muted_conversations.contains(conversation),
        })
    }

    async fn get_account_preferences(&self) -> Result<AccountPreferences> {
        self.state
            .read()
            .await
            .account
            .clone()
            .ok_or_else(|| HeraldError::not_found("account preferences"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_testkit::fixtures;

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let store = MemoryPreferenceStore::new();
        let err = store.get_account_preferences().await.unwrap_err();
        assert!(matches!(err, HeraldError::NotFound { .. }));
    }

    #[tokio::test]
    async fn mute_flags_are_independent() {
        let store = MemoryPreferenceStore::with_account(AccountPreferences::previews_visible());
        let muted = ConversationId::from(&fixtures::group_key(1));
        let other = ConversationId::from(&fixtures::group_key(2));

        store.set_conversation_muted(muted.clone(), true).await;
        assert_eq!(
            store.get_mute_status(&muted).await.unwrap(),
            MuteStatus {
                account_muted: false,
                conversation_muted: true,
            }
        );
        assert_eq!(store.get_mute_status(&other).await.unwrap(), MuteStatus::default());

        store.set_account_muted(true).await;
        store.set_conversation_muted(muted.clone(), false).await;
        assert_eq!(
            store.get_mute_status(&muted).await.unwrap(),
            MuteStatus {
                account_muted: true,
                conversation_muted: false,
            }
        );
    }

    #[tokio::test]
    async fn preference_updates_are_visible_to_later_reads() {
        let store = MemoryPreferenceStore::with_account(AccountPreferences::default());
        assert_eq!(
            store.get_account_preferences().await.unwrap().hide_push_previews,
            None
        );

        store
            .set_account_preferences(AccountPreferences::previews_hidden())
            .await;
        assert_eq!(
            store.get_account_preferences().await.unwrap(),
            AccountPreferences::previews_hidden()
        );
    }
}
