use crate::core::{Block, Difficulty};
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicU64, Ordering};

// Beyond this many zeros a search takes far longer than anyone will wait
const IMPRACTICAL_DIFFICULTY: u32 = 8;

/// Upper bound on mining worker threads; larger requests are clamped.
pub const MAX_MINING_WORKERS: usize = 64;

/// How the nonce space is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiningStrategy {
    #[default]
    Sequential,
    /// Stride the nonce space across a rayon pool of this many threads.
    Parallel(usize),
}

impl MiningStrategy {
    pub fn from_workers(workers: usize) -> MiningStrategy {
        if workers <= 1 {
            MiningStrategy::Sequential
        } else {
            MiningStrategy::Parallel(workers)
        }
    }
}

/// Brute-force search for a nonce whose block hash starts with
/// `difficulty` hex zeros.
///
/// Both strategies commit the smallest qualifying nonce, counted up from
/// zero, so a mined block does not depend on how it was mined.
pub struct ProofOfWork {
    difficulty: Difficulty,
}

impl ProofOfWork {
    pub fn new(difficulty: Difficulty) -> ProofOfWork {
        ProofOfWork { difficulty }
    }

    pub fn get_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Check a block's stored nonce with a single hash.
    pub fn validate(block: &Block, difficulty: Difficulty) -> bool {
        difficulty.is_met_by(&block.hash())
    }

    /// Solve `block` in place and return the number of hashes evaluated.
    pub fn mine(&self, block: &mut Block, strategy: MiningStrategy) -> u64 {
        if self.difficulty.get() >= IMPRACTICAL_DIFFICULTY {
            warn!(
                "Difficulty {} needs about {:.0} hashes on average",
                self.difficulty,
                self.difficulty.expected_attempts()
            );
        }
        match strategy {
            MiningStrategy::Sequential => self.run(block),
            MiningStrategy::Parallel(workers) => self.run_parallel(block, workers),
        }
    }

    /// Sequential search starting from nonce zero. Unbounded.
    pub fn run(&self, block: &mut Block) -> u64 {
        let mut nonce: u64 = 0;
        let mut attempts: u64 = 0;
        loop {
            block.set_nonce(nonce);
            let hash = block.hash();
            attempts += 1;
            if self.difficulty.is_met_by(&hash) {
                info!("Winning hash {hash} (nonce {nonce}, difficulty {})", self.difficulty);
                debug!("Sequential search evaluated {attempts} hashes");
                return attempts;
            }
            nonce = nonce.wrapping_add(1);
        }
    }

    /// Parallel search on a rayon pool: worker `w` of `n` tries nonces
    /// `w, w + n, w + 2n, ...`.
    ///
    /// Workers publish hits into a shared minimum and each one stops as soon as
    /// its next candidate is not below it, so every nonce smaller than the
    /// final answer has been tried by its owner and the result matches
    /// [`ProofOfWork::run`]. At most [`MAX_MINING_WORKERS`] threads are used.
    pub fn run_parallel(&self, block: &mut Block, workers: usize) -> u64 {
        if workers > MAX_MINING_WORKERS {
            warn!("Clamping {workers} mining workers to {MAX_MINING_WORKERS}");
        }
        let workers = workers.min(MAX_MINING_WORKERS);
        if workers <= 1 {
            return self.run(block);
        }
        let pool = match ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Could not start {workers} mining threads ({e}), mining sequentially");
                return self.run(block);
            }
        };

        let stride = workers as u64;
        let best = AtomicU64::new(u64::MAX);
        let difficulty = self.difficulty;
        let template: &Block = block;

        let attempts: u64 = pool.install(|| {
            (0..stride)
                .into_par_iter()
                .map(|worker| {
                    let mut candidate = template.clone();
                    let mut nonce = worker;
                    let mut local_attempts = 0u64;
                    while nonce < best.load(Ordering::Acquire) {
                        candidate.set_nonce(nonce);
                        local_attempts += 1;
                        if difficulty.is_met_by(&candidate.hash()) {
                            best.fetch_min(nonce, Ordering::AcqRel);
                            break;
                        }
                        nonce = match nonce.checked_add(stride) {
                            Some(next) => next,
                            None => break,
                        };
                    }
                    local_attempts
                })
                .sum()
        });

        let nonce = best.into_inner();
        block.set_nonce(nonce);
        info!(
            "Winning hash {} (nonce {nonce}, difficulty {difficulty}, {workers} workers)",
            block.hash()
        );
        debug!("Parallel search evaluated {attempts} hashes");
        attempts
    }
}
