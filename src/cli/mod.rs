//! Command-line interface
//!
//! Argument parsing, the interactive ledger shell and the table and
//! inspector views it prints.

pub mod commands;
pub mod render;
pub mod shell;

pub use commands::{Command, Opt};
pub use render::{inspect_block, ledger_table};
pub use shell::{Flow, Session, ShellCommand};
