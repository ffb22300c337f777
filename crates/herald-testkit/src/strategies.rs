//! Property test strategies for push receive types

use crate::scripted::StageScript;
use herald_core::{AccountPreferences, HeraldError, MuteStatus};
use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

/// Any mute status
pub fn arb_mute_status() -> impl Strategy<Value = MuteStatus> {
    (any::<bool>(), any::<bool>()).prop_map(|(account_muted, conversation_muted)| MuteStatus {
        account_muted,
        conversation_muted,
    })
}

/// Any account preferences, including an unset preview preference
pub fn arb_account_preferences() -> impl Strategy<Value = AccountPreferences> {
    (proptest::option::of(any::<bool>()), any::<bool>()).prop_map(
        |(hide_push_previews, hide_in_app_toasts)| AccountPreferences {
            hide_push_previews,
            hide_in_app_toasts,
        },
    )
}

/// Errors a collaborator may report, including context failures
pub fn arb_herald_error() -> impl Strategy<Value = HeraldError> {
    prop_oneof![
        "[a-z]{1,12}".prop_map(|message| HeraldError::storage(message)),
        "[a-z]{1,12}".prop_map(|message| HeraldError::crypto(message)),
        "[a-z]{1,12}".prop_map(|message| HeraldError::not_found(message)),
        "[a-z]{1,12}".prop_map(|message| HeraldError::cancelled(message)),
        (1u64..10_000).prop_map(|timeout_ms| HeraldError::Timeout { timeout_ms }),
    ]
}

/// A lookup that either succeeds with a value from `values` or fails
pub fn arb_lookup<T, S>(values: S) -> impl Strategy<Value = StageScript<T>>
where
    T: Clone + std::fmt::Debug + 'static,
    S: Strategy<Value = T> + 'static,
{
    prop_oneof![
        values.prop_map(StageScript::Succeed),
        arb_herald_error().prop_map(StageScript::Fail),
    ]
}
