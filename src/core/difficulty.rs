use crate::error::{BlockchainError, Result};
use serde::Serialize;
use std::fmt;

const DEFAULT_DIFFICULTY: u32 = 2;
const MIN_DIFFICULTY: u32 = 1;
// A SHA-256 digest is 64 hex characters long
const MAX_DIFFICULTY: u32 = 64;

/// Number of leading `'0'` hex characters a block hash must start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Difficulty(u32);

impl Difficulty {
    pub fn new(zeros: u32) -> Result<Difficulty> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&zeros) {
            return Err(BlockchainError::InvalidDifficulty(zeros));
        }
        Ok(Difficulty(zeros))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn target_prefix(&self) -> String {
        "0".repeat(self.0 as usize)
    }

    /// Check a hex digest against this difficulty.
    pub fn is_met_by(&self, hex_hash: &str) -> bool {
        let zeros = self.0 as usize;
        hex_hash.len() >= zeros && hex_hash.bytes().take(zeros).all(|b| b == b'0')
    }

    /// Mean number of hashes needed to find a qualifying nonce (16^d).
    pub fn expected_attempts(&self) -> f64 {
        16f64.powi(self.0 as i32)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(DEFAULT_DIFFICULTY)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Difficulty::new(0), Err(BlockchainError::InvalidDifficulty(0)));
        assert_eq!(
            Difficulty::new(65),
            Err(BlockchainError::InvalidDifficulty(65))
        );
        assert!(Difficulty::new(1).is_ok());
        assert!(Difficulty::new(64).is_ok());
    }

    #[test]
    fn test_default_is_two() {
        assert_eq!(Difficulty::default().get(), 2);
    }

    #[test]
    fn test_is_met_by() {
        let difficulty = Difficulty::new(3).unwrap();
        assert_eq!(difficulty.target_prefix(), "000");
        assert!(difficulty.is_met_by("000abc"));
        assert!(difficulty.is_met_by("0000ab"));
        assert!(!difficulty.is_met_by("00a000"));
        assert!(!difficulty.is_met_by("00"));
    }

    #[test]
    fn test_expected_attempts_scaling() {
        let two = Difficulty::new(2).unwrap().expected_attempts();
        let four = Difficulty::new(4).unwrap().expected_attempts();
        assert_eq!(four / two, 256.0);
    }
}
