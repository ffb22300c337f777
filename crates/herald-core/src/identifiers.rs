//! Identifier types used across push receive
//!
//! Group keys, conversation ids and message content ids are opaque byte strings
//! owned by the push cryptography and ingestion collaborators. They display as
//! truncated hex so they can be logged without dumping full key material.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of bytes shown by the `Display` impls of byte identifiers
const DISPLAY_PREFIX_BYTES: usize = 6;

fn fmt_truncated_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if bytes.len() > DISPLAY_PREFIX_BYTES {
        write!(f, "{}…", hex::encode(&bytes[..DISPLAY_PREFIX_BYTES]))
    } else {
        write!(f, "{}", hex::encode(bytes))
    }
}

macro_rules! byte_identifier {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wrap raw identifier bytes
            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Borrow the raw bytes
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Consume into the raw bytes
            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            /// Full lowercase hex encoding
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            /// Whether the identifier carries no bytes
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-"))?;
                fmt_truncated_hex(&self.0, f)
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

byte_identifier!(
    /// Public key of the group a push payload was addressed to
    GroupPublicKey,
    "group"
);

byte_identifier!(
    /// Identity of a conversation in local state
    ///
    /// Conversations are keyed by the public key of their backing group, see
    /// `From<&GroupPublicKey>`.
    ConversationId,
    "conv"
);

byte_identifier!(
    /// Content identifier of a message, used for de-duplication
    MessageCid,
    "cid"
);

byte_identifier!(
    /// Public key of the device that authored a message
    DevicePublicKey,
    "device"
);

impl From<&GroupPublicKey> for ConversationId {
    fn from(group: &GroupPublicKey) -> Self {
        Self(group.as_bytes().to_vec())
    }
}

/// Identifier of one push receive request, used to correlate logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push-{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
