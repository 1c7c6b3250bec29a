// The chain itself: an ordered, append-only list of blocks that always starts
// with the genesis block, plus the difficulty future appends must meet.
// Nothing here is persisted; the chain lives exactly as long as its owner.

use crate::core::{
    Block, Difficulty, MiningStrategy, ProofOfWork, Record, GENESIS_CREATOR_ID, GENESIS_PREV_HASH,
};
use crate::error::{BlockchainError, Result};
use log::{info, warn};
use std::fmt;

/// Outcome of a whole-chain validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainValidation {
    Valid,
    /// First broken link. `expected` is what the block at `position` should
    /// reference, `found` is what it actually stores.
    Invalid {
        position: usize,
        expected: String,
        found: String,
    },
    /// The first block is not a genesis block: wrong payload or creator.
    MalformedGenesis(String),
}

impl ChainValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainValidation::Valid)
    }

    pub fn failed_position(&self) -> Option<usize> {
        match self {
            ChainValidation::Valid => None,
            ChainValidation::Invalid { position, .. } => Some(*position),
            ChainValidation::MalformedGenesis(_) => Some(0),
        }
    }
}

impl fmt::Display for ChainValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainValidation::Valid => write!(f, "Blockchain is valid"),
            ChainValidation::Invalid {
                position,
                expected,
                found,
            } => write!(
                f,
                "Blockchain is invalid at block {position}: expected previous hash {expected}, found {found}"
            ),
            ChainValidation::MalformedGenesis(reason) => {
                write!(f, "Blockchain is invalid at block 0: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: Difficulty,
    strategy: MiningStrategy,
}

impl Blockchain {
    /// A fresh chain holding only the genesis block.
    pub fn new(difficulty: Difficulty) -> Blockchain {
        info!("Initializing chain with difficulty {difficulty}");
        Blockchain {
            blocks: vec![Block::genesis()],
            difficulty,
            strategy: MiningStrategy::Sequential,
        }
    }

    /// Rebuild a chain from an existing block sequence, e.g. a snapshot.
    /// The blocks are taken as they are; call [`Blockchain::validate`] to check them.
    pub fn from_blocks(blocks: Vec<Block>, difficulty: Difficulty) -> Result<Blockchain> {
        if blocks.is_empty() {
            return Err(BlockchainError::ChainEmpty);
        }
        Ok(Blockchain {
            blocks,
            difficulty,
            strategy: MiningStrategy::Sequential,
        })
    }

    pub fn with_strategy(mut self, strategy: MiningStrategy) -> Blockchain {
        self.strategy = strategy;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get_block(&self, index: usize) -> Result<&Block> {
        self.blocks
            .get(index)
            .ok_or(BlockchainError::BlockNotFound(index))
    }

    pub fn tip(&self) -> Result<&Block> {
        self.blocks.last().ok_or(BlockchainError::ChainEmpty)
    }

    pub fn tip_hash(&self) -> Result<String> {
        Ok(self.tip()?.hash())
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Only affects blocks appended from now on.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("Difficulty changed {} -> {difficulty}", self.difficulty);
        self.difficulty = difficulty;
    }

    pub fn strategy(&self) -> MiningStrategy {
        self.strategy
    }

    /// Candidate block linked to the current tip.
    pub fn new_candidate(&self, record: Record, creator_id: u64) -> Result<Block> {
        Ok(Block::new(record, creator_id, self.tip_hash()?))
    }

    /// Mine `candidate` at the current difficulty and hand back the solved block.
    pub fn proof_of_work(&self, mut candidate: Block) -> Block {
        let pow = ProofOfWork::new(self.difficulty);
        pow.mine(&mut candidate, self.strategy);
        candidate
    }

    /// Mine `candidate` and append it.
    ///
    /// The candidate must already reference the current tip's hash; a
    /// mismatch is rejected before any mining and leaves the chain untouched.
    pub fn add_block(&mut self, candidate: Block) -> Result<&Block> {
        let tip_hash = self.tip_hash()?;
        if candidate.get_prev_hash() != tip_hash {
            return Err(BlockchainError::InvalidBlock(format!(
                "previous hash {} does not match tip {tip_hash}",
                candidate.get_prev_hash()
            )));
        }

        let height = self.blocks.len();
        info!(
            "Mining block at height {height} with difficulty {}",
            self.difficulty
        );
        let block = self.proof_of_work(candidate);
        self.blocks.push(block);
        self.tip()
    }

    /// Build a candidate for `record` on top of the tip, mine it and append it.
    pub fn mine_record(&mut self, record: Record, creator_id: u64) -> Result<&Block> {
        let candidate = self.new_candidate(record, creator_id)?;
        self.add_block(candidate)
    }

    /// Check the genesis block's shape and sentinel, then every previous-hash
    /// link, stopping at the first break. Stored nonces are not re-checked against the current
    /// difficulty since it may have changed after they were mined.
    pub fn validate(&self) -> ChainValidation {
        let Some(genesis) = self.blocks.first() else {
            return ChainValidation::Invalid {
                position: 0,
                expected: String::from(GENESIS_PREV_HASH),
                found: String::new(),
            };
        };
        if !genesis.is_genesis() {
            warn!("First block carries a transfer record");
            return ChainValidation::MalformedGenesis(String::from(
                "first block carries a transfer record",
            ));
        }
        if genesis.get_creator_id() != GENESIS_CREATOR_ID {
            warn!("Genesis block has creator {}", genesis.get_creator_id());
            return ChainValidation::MalformedGenesis(format!(
                "genesis creator is {}, expected {GENESIS_CREATOR_ID}",
                genesis.get_creator_id()
            ));
        }
        if genesis.get_prev_hash() != GENESIS_PREV_HASH {
            warn!("Genesis block does not carry the sentinel previous hash");
            return ChainValidation::Invalid {
                position: 0,
                expected: String::from(GENESIS_PREV_HASH),
                found: genesis.get_prev_hash().to_string(),
            };
        }

        let mut prev_hash = genesis.hash();
        for (position, block) in self.blocks.iter().enumerate().skip(1) {
            if block.get_prev_hash() != prev_hash {
                warn!("Blockchain is invalid at block {position}");
                return ChainValidation::Invalid {
                    position,
                    expected: prev_hash,
                    found: block.get_prev_hash().to_string(),
                };
            }
            prev_hash = block.hash();
        }
        info!("Blockchain is valid ({} blocks)", self.blocks.len());
        ChainValidation::Valid
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    #[cfg(test)]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Blockchain::new(Difficulty::default())
    }
}
