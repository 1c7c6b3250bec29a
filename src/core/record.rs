use crate::error::{BlockchainError, Result};
use serde::Serialize;
use std::fmt;

/// One transfer of `amount` from `sender` to `receiver`.
///
/// Records are immutable once built. Their [`Display`](fmt::Display) form is
/// part of the block hash preimage and must not change:
///
/// ```text
/// Record(sender="Alice", receiver="Bob", amount=50.0)
/// ```
///
/// Names are written as Rust debug strings: double-quoted with quotes,
/// backslashes and control characters escaped, so distinct records never
/// render to the same text. The amount uses the shortest round-trip
/// rendering of an `f64`, which always keeps a fractional part (`50.0`,
/// `10.01`). Negative zero is stored as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    sender: String,
    receiver: String,
    amount: f64,
}

impl Record {
    /// Build a record. Sender and receiver are not checked for emptiness.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Result<Record> {
        let amount = Self::check_amount(amount)?;
        Ok(Record {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        })
    }

    /// Interpret user-entered text as an amount.
    pub fn parse_amount(input: &str) -> Result<f64> {
        let amount = input
            .trim()
            .parse::<f64>()
            .map_err(|_| BlockchainError::InvalidAmount(format!("'{input}' is not a number")))?;
        Self::check_amount(amount)
    }

    fn check_amount(amount: f64) -> Result<f64> {
        if !amount.is_finite() {
            return Err(BlockchainError::InvalidAmount(format!(
                "{amount} is not a finite number"
            )));
        }
        if amount < 0.0 {
            return Err(BlockchainError::InvalidAmount(format!(
                "{amount} is negative"
            )));
        }
        // -0.0 passes the sign check but would hash as "-0.0"
        if amount == 0.0 {
            return Ok(0.0);
        }
        Ok(amount)
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_receiver(&self) -> &str {
        self.receiver.as_str()
    }

    pub fn get_amount(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record(sender={:?}, receiver={:?}, amount={:?})",
            self.sender, self.receiver, self.amount
        )
    }
}
