//! The notification decision returned by a successful receive

use crate::presentation::NotificationPresentation;
use herald_core::{DecryptedPushData, InteractionRecord, MuteStatus, ReceiverConfig};
use serde::{Deserialize, Serialize};

/// Everything the UI layer needs to decide whether and how to notify
///
/// Built once per receive and handed to the caller; it has no identity of its own
/// and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDecision {
    /// Protocol data produced by the decryptor
    pub protocol_data: DecryptedPushData,
    /// Interaction recorded by the ingestor
    pub interaction: InteractionRecord,
    /// Message was seen before, by the decryptor or the ingestor
    pub already_received: bool,
    /// Conversation is muted (or its status could not be read)
    pub conversation_muted: bool,
    /// Account is muted (or its status could not be read)
    pub account_muted: bool,
    /// Message content must not be shown
    pub hide_preview: bool,
}

impl NotificationDecision {
    /// Mute flags as a [`MuteStatus`]
    pub fn mute_status(&self) -> MuteStatus {
        MuteStatus {
            account_muted: self.account_muted,
            conversation_muted: self.conversation_muted,
        }
    }

    /// Whether the notification should be dropped entirely
    ///
    /// Replays and our own messages never notify.
    pub fn is_suppressed(&self) -> bool {
        self.already_received || self.interaction.is_mine
    }

    /// Whether the user should be actively alerted (sound, banner)
    pub fn should_alert(&self) -> bool {
        !self.is_suppressed() && !self.mute_status().is_muted()
    }

    /// Render the decision for display
    pub fn presentation(&self, config: &ReceiverConfig) -> NotificationPresentation {
        NotificationPresentation::render(self, config)
    }
}
