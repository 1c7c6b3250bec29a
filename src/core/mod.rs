//! Core ledger functionality
//!
//! Records, blocks, the proof-of-work search and the chain that ties them
//! together.

pub mod block;
pub mod blockchain;
pub mod difficulty;
pub mod proof_of_work;
pub mod record;
pub mod shared;

pub use block::{Block, Payload, GENESIS_CREATOR_ID, GENESIS_PREV_HASH};
pub use blockchain::{Blockchain, ChainValidation};
pub use difficulty::Difficulty;
pub use proof_of_work::{MiningStrategy, ProofOfWork, MAX_MINING_WORKERS};
pub use record::Record;
pub use shared::SharedBlockchain;
