//! Utility functions and helpers
//!
//! Hashing and clock helpers shared by the ledger core.

pub mod crypto;

pub use crypto::{current_timestamp, hex_digest, sha256_digest};
