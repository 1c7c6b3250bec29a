use crate::core::Record;
use crate::utils::{current_timestamp, hex_digest};
use serde::Serialize;
use std::fmt;

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Creator identifier of the genesis block.
pub const GENESIS_CREATOR_ID: u64 = 0;

/// What a block carries: the genesis placeholder or a real transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Payload {
    Genesis,
    Transfer(Record),
}

impl Payload {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Payload::Genesis => None,
            Payload::Transfer(record) => Some(record),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Genesis => write!(f, "Genesis"),
            Payload::Transfer(record) => write!(f, "{record}"),
        }
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Payload::Transfer(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    payload: Payload,
    creator_id: u64,
    prev_hash: String,
    timestamp: String,
    nonce: u64,
}

impl Block {
    /// Candidate block stamped with the current time and a zero nonce.
    pub fn new(record: Record, creator_id: u64, prev_hash: impl Into<String>) -> Block {
        Self::with_timestamp(record, creator_id, prev_hash, current_timestamp())
    }

    /// Same as [`Block::new`] but with a caller-chosen timestamp, which makes
    /// the hash reproducible.
    pub fn with_timestamp(
        record: Record,
        creator_id: u64,
        prev_hash: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Block {
        Block {
            payload: Payload::Transfer(record),
            creator_id,
            prev_hash: prev_hash.into(),
            timestamp: timestamp.into(),
            nonce: 0,
        }
    }

    pub fn genesis() -> Block {
        Block {
            payload: Payload::Genesis,
            creator_id: GENESIS_CREATOR_ID,
            prev_hash: String::from(GENESIS_PREV_HASH),
            timestamp: current_timestamp(),
            nonce: 0,
        }
    }

    /// Hash preimage: the textual form of payload, creator id, timestamp,
    /// previous hash and nonce, concatenated in that order with no separator.
    fn prepare_data(&self) -> Vec<u8> {
        let mut data_bytes = vec![];
        data_bytes.extend(self.payload.to_string().as_bytes());
        data_bytes.extend(self.creator_id.to_string().as_bytes());
        data_bytes.extend(self.timestamp.as_bytes());
        data_bytes.extend(self.prev_hash.as_bytes());
        data_bytes.extend(self.nonce.to_string().as_bytes());
        data_bytes
    }

    /// SHA-256 of the block contents as lowercase hex.
    pub fn hash(&self) -> String {
        hex_digest(self.prepare_data().as_slice())
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self.payload, Payload::Genesis)
    }

    pub fn get_payload(&self) -> &Payload {
        &self.payload
    }

    pub fn get_record(&self) -> Option<&Record> {
        self.payload.record()
    }

    pub fn get_creator_id(&self) -> u64 {
        self.creator_id
    }

    pub fn get_prev_hash(&self) -> &str {
        self.prev_hash.as_str()
    }

    pub fn get_timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub(crate) fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }

    #[cfg(test)]
    pub(crate) fn tamper_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    #[cfg(test)]
    pub(crate) fn tamper_creator_id(&mut self, creator_id: u64) {
        self.creator_id = creator_id;
    }

    #[cfg(test)]
    pub(crate) fn tamper_timestamp(&mut self, timestamp: &str) {
        self.timestamp = timestamp.to_string();
    }

    #[cfg(test)]
    pub(crate) fn tamper_prev_hash(&mut self, prev_hash: &str) {
        self.prev_hash = prev_hash.to_string();
    }
}
