//! Fail-toward-privacy decision functions
//!
//! Each function turns one (possibly failed) collaborator answer into the value
//! that goes into the [`NotificationDecision`](crate::NotificationDecision). A
//! failed lookup always resolves to the most private, quietest value.

use herald_core::{AccountPreferences, MuteStatus};
use serde::{Deserialize, Serialize};

/// Combine the decryptor's replay hint with the ingestor's novelty flag.
///
/// A message is already received when either layer says so.
pub fn resolve_already_received(decrypted_already_received: bool, is_new: bool) -> bool {
    decrypted_already_received || !is_new
}

/// Mute status to apply given the result of the mute lookup.
///
/// Any lookup error silences both the account and the conversation.
pub fn resolve_mute_status<E>(lookup: Result<MuteStatus, E>) -> MuteStatus {
    lookup.unwrap_or_else(|_| MuteStatus::silenced())
}

/// Whether notification content may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviewVisibility {
    /// Only a generic body may be shown
    Hidden,
    /// Message content may be shown
    Visible,
}

impl PreviewVisibility {
    /// Whether the preview is hidden
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Preview visibility given the result of the account preference lookup.
///
/// Previews are visible only when the lookup succeeded and the user explicitly
/// turned preview hiding off. Errors and unset preferences hide previews.
pub fn resolve_preview_visibility<E>(lookup: Result<AccountPreferences, E>) -> PreviewVisibility {
    match lookup {
        Ok(AccountPreferences {
            hide_push_previews: Some(false),
            ..
        }) => PreviewVisibility::Visible,
        _ => PreviewVisibility::Hidden,
    }
}
