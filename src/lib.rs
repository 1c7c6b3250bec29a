//! # Minichain - My In-Memory Proof-of-Work Ledger
//!
//! A small ledger of transfer records chained together by SHA-256 hashes.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Records**: immutable `sender -> receiver: amount` transfers
//! - **Blocks**: a record plus creator id, previous hash, timestamp and nonce
//! - **Proof-of-Work**: brute-force nonce search for N leading hex zeros,
//!   sequential or striped across worker threads
//! - **Chain**: genesis-first append-only block list with link validation
//! - **Shell**: an interactive prompt to add, list, inspect and validate
//!
//! ## How I Organized My Code
//! - `core/`: records, blocks, difficulty, mining and the chain
//! - `config/`: settings from defaults, a TOML file and the environment
//! - `cli/`: argument parsing, the interactive shell and table rendering
//! - `utils/`: hashing and clock helpers
//! - `error/`: the error enum every fallible call returns
//!
//! ## Key Design Decisions I Made
//! - Nothing is persisted: the chain lives exactly as long as its owner
//! - `add_block` refuses a candidate that does not point at the current tip,
//!   and `new_candidate`/`mine_record` link it for me
//! - Validation returns the first broken position instead of a bare bool
//! - Mining always commits the smallest qualifying nonce, whatever the strategy
//!
//! ## When I Need to Understand Something
//! 1. `core/block.rs` for exactly which bytes get hashed
//! 2. `core/proof_of_work.rs` for the nonce search
//! 3. `core/blockchain.rs` for append and validation
//! 4. `cli/shell.rs` for how a session drives the chain

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt, Session, ShellCommand};
pub use config::Config;
pub use core::{
    Block, Blockchain, ChainValidation, Difficulty, MiningStrategy, Payload, ProofOfWork, Record,
    SharedBlockchain, GENESIS_CREATOR_ID, GENESIS_PREV_HASH, MAX_MINING_WORKERS,
};
pub use error::{BlockchainError, Result};
pub use utils::{current_timestamp, hex_digest, sha256_digest};
