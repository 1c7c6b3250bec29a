use crate::core::{Difficulty, MiningStrategy, MAX_MINING_WORKERS};
use crate::error::{BlockchainError, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_DIFFICULTY: u32 = 2;
const DEFAULT_CREATOR_ID: u64 = 42;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MINING_WORKERS: usize = 1;

const DIFFICULTY_KEY: &str = "MINICHAIN_DIFFICULTY";
const CREATOR_ID_KEY: &str = "MINICHAIN_CREATOR_ID";
const LOG_LEVEL_KEY: &str = "MINICHAIN_LOG";
const MINING_WORKERS_KEY: &str = "MINICHAIN_WORKERS";

/// Session settings, layered as defaults, then an optional TOML file, then
/// `MINICHAIN_*` environment variables. Command-line flags go on top via the
/// setters.
///
/// ```toml
/// difficulty = 3
/// creator_id = 7
/// log_level = "debug"
/// mining_workers = 4
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    difficulty: u32,
    creator_id: u64,
    log_level: String,
    mining_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty: DEFAULT_DIFFICULTY,
            creator_id: DEFAULT_CREATOR_ID,
            log_level: String::from(DEFAULT_LOG_LEVEL),
            mining_workers: DEFAULT_MINING_WORKERS,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| {
            BlockchainError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Override fields from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DIFFICULTY_KEY) {
            self.difficulty = parse_var(DIFFICULTY_KEY, &value)?;
        }
        if let Some(value) = lookup(CREATOR_ID_KEY) {
            self.creator_id = parse_var(CREATOR_ID_KEY, &value)?;
        }
        if let Some(value) = lookup(LOG_LEVEL_KEY) {
            self.log_level = value;
        }
        if let Some(value) = lookup(MINING_WORKERS_KEY) {
            self.mining_workers = parse_var(MINING_WORKERS_KEY, &value)?;
        }
        Ok(())
    }

    pub fn get_difficulty(&self) -> Result<Difficulty> {
        Difficulty::new(self.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }

    pub fn get_creator_id(&self) -> u64 {
        self.creator_id
    }

    pub fn set_creator_id(&mut self, creator_id: u64) {
        self.creator_id = creator_id;
    }

    pub fn get_log_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            BlockchainError::Config(format!("Unknown log level '{}'", self.log_level))
        })
    }

    /// Rejects more than [`MAX_MINING_WORKERS`] threads.
    pub fn get_mining_strategy(&self) -> Result<MiningStrategy> {
        if self.mining_workers > MAX_MINING_WORKERS {
            return Err(BlockchainError::Config(format!(
                "mining_workers is {}, at most {MAX_MINING_WORKERS} allowed",
                self.mining_workers
            )));
        }
        Ok(MiningStrategy::from_workers(self.mining_workers))
    }

    pub fn set_mining_workers(&mut self, workers: usize) {
        self.mining_workers = workers;
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| BlockchainError::Config(format!("{key} has invalid value '{value}'")))
}
