use crate::cli::render::{inspect_block, ledger_table};
use crate::core::{Blockchain, ChainValidation, Difficulty, Record};
use crate::error::{BlockchainError, Result};
use log::error;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
Commands:
  add <sender> <receiver> <amount>  mine a transfer onto the chain
  chain                             show the ledger
  inspect <index>                   show one block in full
  difficulty [n]                    show or change the difficulty
  validate                          check every block link
  help                              show this text
  quit                              leave the session

Quote names that contain spaces: add \"Alice Smith\" Bob 5";

/// One line typed at the ledger prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add {
        sender: String,
        receiver: String,
        amount: f64,
    },
    Chain,
    Inspect(usize),
    Difficulty(Option<u32>),
    Validate,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let words = shell_words::split(s).map_err(|e| format!("Cannot parse command: {e}"))?;
        let Some((name, args)) = words.split_first() else {
            return Err("Empty command. Type 'help' for the list of commands".to_string());
        };
        match (name.to_lowercase().as_str(), args) {
            ("add", [sender, receiver, amount]) => Ok(ShellCommand::Add {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                amount: Record::parse_amount(amount).map_err(|e| e.to_string())?,
            }),
            ("add", _) => Err("Usage: add <sender> <receiver> <amount>".to_string()),
            ("chain", []) => Ok(ShellCommand::Chain),
            ("inspect", [index]) => index
                .parse::<usize>()
                .map(ShellCommand::Inspect)
                .map_err(|_| format!("Invalid block index: {index}")),
            ("inspect", _) => Err("Usage: inspect <index>".to_string()),
            ("difficulty", []) => Ok(ShellCommand::Difficulty(None)),
            ("difficulty", [value]) => value
                .parse::<u32>()
                .map(|n| ShellCommand::Difficulty(Some(n)))
                .map_err(|_| format!("Invalid difficulty: {value}")),
            ("validate", []) => Ok(ShellCommand::Validate),
            ("help", _) => Ok(ShellCommand::Help),
            ("quit", _) | ("exit", _) => Ok(ShellCommand::Quit),
            _ => Err(format!(
                "Unknown command: {}. Type 'help' for the list of commands",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An interactive session owning its chain for as long as it runs.
pub struct Session {
    chain: Blockchain,
    creator_id: u64,
}

impl Session {
    pub fn new(chain: Blockchain, creator_id: u64) -> Session {
        Session { chain, creator_id }
    }

    pub fn chain(&self) -> &Blockchain {
        &self.chain
    }

    pub fn into_chain(self) -> Blockchain {
        self.chain
    }

    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<Flow> {
        match command {
            ShellCommand::Add {
                sender,
                receiver,
                amount,
            } => {
                let record = Record::new(sender, receiver, amount)?;
                let (nonce, hash) = {
                    let block = self.chain.mine_record(record, self.creator_id)?;
                    (block.get_nonce(), block.hash())
                };
                let height = self.chain.len() - 1;
                writeln!(out, "Mined block {height} with nonce {nonce}: {hash}")?;
            }
            ShellCommand::Chain => {
                writeln!(out, "{}", ledger_table(self.chain.blocks()))?;
            }
            ShellCommand::Inspect(index) => {
                let block = self.chain.get_block(index)?;
                writeln!(out, "{}", inspect_block(index, block)?)?;
            }
            ShellCommand::Difficulty(None) => {
                writeln!(out, "Difficulty: {}", self.chain.difficulty())?;
            }
            ShellCommand::Difficulty(Some(zeros)) => {
                self.chain.set_difficulty(Difficulty::new(zeros)?);
                writeln!(out, "Difficulty set to {zeros}")?;
            }
            ShellCommand::Validate => match self.chain.validate() {
                ChainValidation::Valid => writeln!(out, "true")?,
                invalid => writeln!(out, "false\n{invalid}")?,
            },
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Read commands line by line until `quit` or end of input. Bad input is
    /// reported on `out` and the session carries on; I/O failures end it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                let flow = match line.parse::<ShellCommand>() {
                    Ok(command) => match self.execute(command, out) {
                        Ok(flow) => flow,
                        Err(e @ BlockchainError::Io(_)) | Err(e @ BlockchainError::Lock(_)) => {
                            return Err(e)
                        }
                        Err(e) => {
                            error!("{e}");
                            writeln!(out, "Error: {e}")?;
                            Flow::Continue
                        }
                    },
                    Err(msg) => {
                        writeln!(out, "{msg}")?;
                        Flow::Continue
                    }
                };
                if flow == Flow::Exit {
                    return Ok(());
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> Session {
        Session::new(Blockchain::new(Difficulty::new(1).unwrap()), 42)
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add Alice Bob 50".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add {
                sender: "Alice".to_string(),
                receiver: "Bob".to_string(),
                amount: 50.0,
            }
        );
        assert_eq!("CHAIN".parse::<ShellCommand>().unwrap(), ShellCommand::Chain);
        assert_eq!(
            "inspect 2".parse::<ShellCommand>().unwrap(),
            ShellCommand::Inspect(2)
        );
        assert_eq!(
            "difficulty".parse::<ShellCommand>().unwrap(),
            ShellCommand::Difficulty(None)
        );
        assert_eq!(
            "difficulty 4".parse::<ShellCommand>().unwrap(),
            ShellCommand::Difficulty(Some(4))
        );
        assert_eq!("exit".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_quoted_names() {
        assert_eq!(
            r#"add "Alice Smith" 'Bob Jones' 5"#.parse::<ShellCommand>().unwrap(),
            ShellCommand::Add {
                sender: "Alice Smith".to_string(),
                receiver: "Bob Jones".to_string(),
                amount: 5.0,
            }
        );
        assert!(r#"add "Alice Smith Bob 5"#.parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_add_with_spaced_name() {
        let mut session = session();
        let output = run_script(&mut session, "add \"Alice Smith\" Bob 5\nvalidate\n");

        assert!(output.contains("Mined block 1"));
        assert_eq!(session.chain().len(), 2);
        let record = session.chain().tip().unwrap().get_record().unwrap();
        assert_eq!(record.get_sender(), "Alice Smith");
        assert_eq!(record.get_receiver(), "Bob");
    }

    #[test]
    fn test_parse_errors() {
        assert!("add Alice Bob".parse::<ShellCommand>().is_err());
        assert!("add Alice Bob many".parse::<ShellCommand>().is_err());
        assert!("inspect x".parse::<ShellCommand>().is_err());
        assert!("mint 5".parse::<ShellCommand>().is_err());
        assert!("".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_add_then_validate() {
        let mut session = session();
        let output = run_script(&mut session, "add Alice Bob 50\nvalidate\nquit\n");

        assert!(output.contains("Mined block 1"));
        assert!(output.contains("true"));
        assert_eq!(session.chain().len(), 2);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = session();
        let output = run_script(
            &mut session,
            "difficulty 0\ninspect 9\nbogus\nadd Carol Dave 1.25\n",
        );

        assert!(output.contains("Invalid difficulty: 0"));
        assert!(output.contains("No block at index 9"));
        assert!(output.contains("Unknown command: bogus"));
        assert_eq!(session.chain().len(), 2);
        assert_eq!(session.chain().difficulty().get(), 1);
    }

    #[test]
    fn test_difficulty_and_inspect() {
        let mut session = session();
        let output = run_script(&mut session, "difficulty 2\nadd A B 3\ninspect 1\ndifficulty\n");

        assert!(output.contains("Difficulty set to 2"));
        assert!(output.contains("\"creator_id\": 42"));
        assert!(output.contains("Difficulty: 2"));
        let tip = session.chain().tip().unwrap();
        assert!(tip.hash().starts_with("00"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut session = session();
        run_script(&mut session, "quit\nadd A B 1\n");
        assert_eq!(session.chain().len(), 1);
    }

    #[test]
    fn test_chain_table_lists_blocks() {
        let mut session = session();
        let output = run_script(&mut session, "add Alice Bob 50\nchain\n");
        assert!(output.contains("Genesis"));
        assert!(output.contains("Alice"));
    }
}
