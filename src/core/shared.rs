use crate::core::{Block, Blockchain, ChainValidation, Difficulty, Record};
use crate::error::{BlockchainError, Result};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle for callers on several threads.
///
/// An append holds the write lock for the whole mine-and-push, so a
/// concurrent validation never sees a half-appended chain.
#[derive(Clone)]
pub struct SharedBlockchain {
    inner: Arc<RwLock<Blockchain>>,
}

impl SharedBlockchain {
    pub fn new(chain: Blockchain) -> SharedBlockchain {
        SharedBlockchain {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Blockchain>> {
        self.inner
            .read()
            .map_err(|e| BlockchainError::Lock(format!("Failed to acquire read lock on chain: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Blockchain>> {
        self.inner
            .write()
            .map_err(|e| BlockchainError::Lock(format!("Failed to acquire write lock on chain: {e}")))
    }

    /// Returns the hash of the appended block.
    pub fn mine_record(&self, record: Record, creator_id: u64) -> Result<String> {
        let mut chain = self.write()?;
        Ok(chain.mine_record(record, creator_id)?.hash())
    }

    pub fn add_block(&self, candidate: Block) -> Result<String> {
        let mut chain = self.write()?;
        Ok(chain.add_block(candidate)?.hash())
    }

    pub fn validate(&self) -> Result<ChainValidation> {
        Ok(self.read()?.validate())
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        self.write()?.set_difficulty(difficulty);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Copy of the current block sequence.
    pub fn snapshot(&self) -> Result<Vec<Block>> {
        Ok(self.read()?.blocks().to_vec())
    }
}
