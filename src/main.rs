// This is my main entry point for the ledger CLI
// The chain only lives in memory, so everything happens inside one process run
use clap::Parser;
use log::error;
use minichain::cli::{ledger_table, Session};
use minichain::{Blockchain, Command, Config, Opt, Record};
use std::io::{self, Write};
use std::process;

fn main() {
    let opt = Opt::parse();

    // I load settings first because the log level comes from them
    let config = match load_config(&opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // I initialize logging with the configured level
    match config.get_log_filter() {
        Ok(level) => env_logger::builder().filter_level(level).init(),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    // If something goes wrong, I log the error and exit with code 1
    if let Err(e) = run_command(opt.command.unwrap_or(Command::Shell), &config) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// Defaults, then the TOML file, then MINICHAIN_* variables, then my flags
fn load_config(opt: &Opt) -> minichain::Result<Config> {
    let mut config = Config::load(opt.config.as_deref())?;
    if let Some(difficulty) = opt.difficulty {
        config.set_difficulty(difficulty);
    }
    if let Some(creator_id) = opt.creator_id {
        config.set_creator_id(creator_id);
    }
    if let Some(workers) = opt.workers {
        config.set_mining_workers(workers);
    }
    Ok(config)
}

fn run_command(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Every run starts from a fresh chain holding only the genesis block
    let chain =
        Blockchain::new(config.get_difficulty()?).with_strategy(config.get_mining_strategy()?);

    match command {
        // The interactive session owns the chain until I quit
        Command::Shell => {
            println!("Ledger ready (difficulty {}). Type 'help' for commands.", chain.difficulty());
            let mut session = Session::new(chain, config.get_creator_id());
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session.run(stdin.lock(), &mut stdout)?;
        }
        // One-shot mode: mine the same transfer `count` times and show the result
        Command::Mine {
            sender,
            receiver,
            amount,
            count,
        } => {
            let mut chain = chain;
            for _ in 0..count {
                let record = Record::new(sender.as_str(), receiver.as_str(), amount)?;
                chain.mine_record(record, config.get_creator_id())?;
            }
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", ledger_table(chain.blocks()))?;
            writeln!(stdout, "{}", chain.validate())?;
        }
    }
    Ok(())
}
