//! Push receive data model
//!
//! These are the values that flow between the collaborators and the push
//! receive orchestration. None of them carry behavior beyond small accessors;
//! the fail-safe decision logic lives in `herald-push`.

use crate::identifiers::{ConversationId, DevicePublicKey, GroupPublicKey, MessageCid};
use serde::{Deserialize, Serialize};

/// Message envelope delivered outside of the regular sync stream
///
/// The envelope is produced by the push cryptography collaborator and handed
/// unchanged to the ingestion collaborator, which uses it to de-duplicate
/// against messages later replayed by sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfStoreMessage {
    /// Content identifier of the message
    pub cid: MessageCid,
    /// Device that authored the message
    pub device_public_key: DevicePublicKey,
    /// Per-device message counter
    pub counter: u64,
    /// Author signature over the encrypted payload
    pub signature: Vec<u8>,
    /// Protocol flags
    pub flags: u32,
    /// Payload still encrypted under the group key
    pub encrypted_payload: Vec<u8>,
    /// Nonce used for the group encryption
    pub nonce: Vec<u8>,
}

/// Result of unwrapping an encrypted push payload
///
/// Produced once per receive call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedPushData {
    /// Group the message belongs to
    pub group_public_key: GroupPublicKey,
    /// Envelope of the message
    pub message: OutOfStoreMessage,
    /// Decrypted application payload
    pub cleartext: Vec<u8>,
    /// Hint from the cryptography layer that this message was already seen
    pub already_received: bool,
}

/// Kind of interaction recorded for an ingested message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    /// Text message written by a member
    UserMessage,
    /// Invitation to join another group
    GroupInvitation,
    /// Member profile update
    SetUserInfo,
    /// Delivery acknowledgement
    Acknowledge,
    /// Reaction to another interaction
    Reaction,
    /// Anything this client does not understand
    #[serde(other)]
    Unknown,
}

/// Interaction stored by the ingestion collaborator for one message
///
/// The orchestrator only reads it; its lifecycle belongs to the ingestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Content identifier of the underlying message
    pub cid: MessageCid,
    /// Conversation the interaction belongs to
    pub conversation_id: ConversationId,
    /// Kind of interaction
    pub interaction_type: InteractionType,
    /// Application payload of the interaction
    pub payload: Vec<u8>,
    /// Sender-declared send time, ms since UNIX epoch
    pub sent_date_ms: u64,
    /// Whether the interaction was authored by one of our own devices
    pub is_mine: bool,
}

impl InteractionRecord {
    /// Payload as display text, when it is a user message with valid UTF-8
    pub fn text(&self) -> Option<&str> {
        match self.interaction_type {
            InteractionType::UserMessage => std::str::from_utf8(&self.payload).ok(),
            _ => None,
        }
    }
}

/// Outcome of recording an out-of-store message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// Interaction stored (or previously stored) for the message
    pub interaction: InteractionRecord,
    /// Whether this call recorded the message for the first time
    pub is_new: bool,
}

/// Mute flags for one conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MuteStatus {
    /// Notifications are muted for the whole account
    pub account_muted: bool,
    /// Notifications are muted for this conversation
    pub conversation_muted: bool,
}

impl MuteStatus {
    /// Both flags set
    pub const fn silenced() -> Self {
        Self {
            account_muted: true,
            conversation_muted: true,
        }
    }

    /// Whether either flag is set
    pub const fn is_muted(&self) -> bool {
        self.account_muted || self.conversation_muted
    }
}

/// Account-level notification preferences
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountPreferences {
    /// Explicit preview preference; `None` means the user never chose
    #[serde(default)]
    pub hide_push_previews: Option<bool>,
    /// Hide in-app toasts for incoming messages
    #[serde(default)]
    pub hide_in_app_toasts: bool,
}

impl AccountPreferences {
    /// Preferences where the user explicitly asked to see previews
    pub fn previews_visible() -> Self {
        Self {
            hide_push_previews: Some(false),
            ..Self::default()
        }
    }

    /// Preferences where the user explicitly asked to hide previews
    pub fn previews_hidden() -> Self {
        Self {
            hide_push_previews: Some(true),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(interaction_type: InteractionType, payload: &[u8]) -> InteractionRecord {
        InteractionRecord {
            cid: MessageCid::new(vec![1]),
            conversation_id: ConversationId::new(vec![2]),
            interaction_type,
            payload: payload.to_vec(),
            sent_date_ms: 1_000,
            is_mine: false,
        }
    }

    #[test]
    fn text_only_for_user_messages() {
        assert_eq!(
            interaction(InteractionType::UserMessage, b"hi").text(),
            Some("hi")
        );
        assert_eq!(interaction(InteractionType::Reaction, b"hi").text(), None);
        assert_eq!(
            interaction(InteractionType::UserMessage, &[0xff, 0xfe]).text(),
            None
        );
    }

    #[test]
    fn missing_preview_preference_deserializes_as_unset() {
        let prefs: AccountPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.hide_push_previews, None);
        assert!(!prefs.hide_in_app_toasts);
    }

    #[test]
    fn unknown_interaction_kinds_map_to_unknown() {
        let kind: InteractionType = serde_json::from_str("\"poll\"").unwrap();
        assert_eq!(kind, InteractionType::Unknown);
    }

    #[test]
    fn silenced_sets_both_flags() {
        let status = MuteStatus::silenced();
        assert!(status.account_muted && status.conversation_muted);
        assert!(status.is_muted());
        assert!(!MuteStatus::default().is_muted());
    }
}
