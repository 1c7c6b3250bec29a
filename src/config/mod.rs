//! Configuration management
//!
//! Difficulty, creator identifier, log level and mining workers for one
//! ledger session. Loaded once at startup and passed down explicitly.

pub mod settings;

pub use settings::Config;
