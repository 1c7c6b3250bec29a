use crate::core::Record;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn parse_amount(input: &str) -> Result<f64, String> {
    Record::parse_amount(input).map_err(|e| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "minichain", about = "In-memory proof-of-work ledger")]
pub struct Opt {
    #[arg(long, global = true, help = "TOML settings file")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Leading hex zeros required in a block hash (1-64)"
    )]
    pub difficulty: Option<u32>,
    #[arg(
        long = "creator-id",
        global = true,
        help = "Identifier stamped on mined blocks"
    )]
    pub creator_id: Option<u64>,
    #[arg(long, global = true, help = "Worker threads used for mining")]
    pub workers: Option<usize>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    #[command(name = "shell", about = "Start an interactive ledger session")]
    Shell,
    #[command(
        name = "mine",
        about = "Mine transfers into a fresh chain and print the ledger"
    )]
    Mine {
        #[arg(help = "Name of the sender")]
        sender: String,
        #[arg(help = "Name of the receiver")]
        receiver: String,
        #[arg(help = "Transfer amount", value_parser = parse_amount)]
        amount: f64,
        #[arg(long, default_value_t = 1, help = "Number of blocks to mine")]
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let opt = Opt::try_parse_from(["minichain"]).unwrap();
        assert!(opt.command.is_none());
        assert!(opt.difficulty.is_none());
    }

    #[test]
    fn test_mine_with_global_flags() {
        let opt = Opt::try_parse_from([
            "minichain",
            "mine",
            "Alice",
            "Bob",
            "50",
            "--count",
            "3",
            "--difficulty",
            "3",
        ])
        .unwrap();
        assert_eq!(opt.difficulty, Some(3));
        assert_eq!(
            opt.command,
            Some(Command::Mine {
                sender: "Alice".to_string(),
                receiver: "Bob".to_string(),
                amount: 50.0,
                count: 3,
            })
        );
    }

    #[test]
    fn test_mine_rejects_bad_amount() {
        assert!(Opt::try_parse_from(["minichain", "mine", "Alice", "Bob", "lots"]).is_err());
    }
}
