//! Deterministic push receive fixtures
//!
//! All fixtures derive from a single group and message so the values produced
//! by different helpers agree with each other (the interaction belongs to the
//! conversation of the decrypted group, and shares the message cid).

use herald_core::{
    ConversationId, DecryptedPushData, DevicePublicKey, GroupPublicKey, IngestOutcome,
    InteractionRecord, InteractionType, MessageCid, OutOfStoreMessage,
};

/// Cleartext carried by [`decrypted_push`]
pub const SAMPLE_CLEARTEXT: &[u8] = b"hello from push";

/// Group key derived from `seed`
pub fn group_key(seed: u8) -> GroupPublicKey {
    GroupPublicKey::new(vec![seed; 32])
}

/// Envelope for message number `counter` from a fixed device
pub fn out_of_store_message(counter: u64) -> OutOfStoreMessage {
    let mut cid = vec![0xc1; 8];
    cid.extend_from_slice(&counter.to_be_bytes());
    OutOfStoreMessage {
        cid: MessageCid::new(cid),
        device_public_key: DevicePublicKey::new(vec![0xd0; 32]),
        counter,
        signature: vec![0x51; 64],
        flags: 0,
        encrypted_payload: vec![0xee; 24],
        nonce: vec![0x0e; 24],
    }
}

/// Decrypted push for group 1, message 1
pub fn decrypted_push(already_received: bool) -> DecryptedPushData {
    DecryptedPushData {
        group_public_key: group_key(1),
        message: out_of_store_message(1),
        cleartext: SAMPLE_CLEARTEXT.to_vec(),
        already_received,
    }
}

/// Interaction recorded for [`decrypted_push`]
pub fn interaction() -> InteractionRecord {
    InteractionRecord {
        cid: out_of_store_message(1).cid,
        conversation_id: ConversationId::from(&group_key(1)),
        interaction_type: InteractionType::UserMessage,
        payload: SAMPLE_CLEARTEXT.to_vec(),
        sent_date_ms: 1_640_995_200_000,
        is_mine: false,
    }
}

/// Ingest outcome for [`decrypted_push`]
pub fn ingest_outcome(is_new: bool) -> IngestOutcome {
    IngestOutcome {
        interaction: interaction(),
        is_new,
    }
}
