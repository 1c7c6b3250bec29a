//! Error handling for the ledger
//!
//! Mining never fails and a broken chain is reported as a value by
//! validation, so these errors only cover rejected inputs and plumbing.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BlockchainError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockchainError {
    /// Amount is not a finite, non-negative number
    InvalidAmount(String),
    /// Difficulty outside 1..=64 leading hex zeros
    InvalidDifficulty(u32),
    /// A chain was requested with no blocks at all
    ChainEmpty,
    /// Candidate block rejected before mining
    InvalidBlock(String),
    /// No block stored at this position
    BlockNotFound(usize),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File and terminal I/O errors
    Io(String),
    /// A shared chain lock was poisoned by a panicking holder
    Lock(String),
}

impl fmt::Display for BlockchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockchainError::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            BlockchainError::InvalidDifficulty(difficulty) => write!(
                f,
                "Invalid difficulty: {difficulty} (expected 1 to 64 leading zeros)"
            ),
            BlockchainError::ChainEmpty => write!(f, "Chain has no blocks"),
            BlockchainError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            BlockchainError::BlockNotFound(index) => write!(f, "No block at index {index}"),
            BlockchainError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BlockchainError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            BlockchainError::Io(msg) => write!(f, "I/O error: {msg}"),
            BlockchainError::Lock(msg) => write!(f, "Lock error: {msg}"),
        }
    }
}

impl std::error::Error for BlockchainError {}

impl From<std::io::Error> for BlockchainError {
    fn from(err: std::io::Error) -> Self {
        BlockchainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for BlockchainError {
    fn from(err: toml::de::Error) -> Self {
        BlockchainError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for BlockchainError {
    fn from(err: serde_json::Error) -> Self {
        BlockchainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BlockchainError::InvalidDifficulty(0).to_string(),
            "Invalid difficulty: 0 (expected 1 to 64 leading zeros)"
        );
        assert_eq!(BlockchainError::ChainEmpty.to_string(), "Chain has no blocks");
        assert_eq!(
            BlockchainError::BlockNotFound(7).to_string(),
            "No block at index 7"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BlockchainError = io.into();
        assert!(matches!(err, BlockchainError::Io(msg) if msg.contains("missing")));
    }
}
