//! Fee-carrying transfer transactions.

use crate::hash::{hash, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing a transaction record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("expected 4 fields (sender receiver amount fee), found {0}")]
    FieldCount(usize),
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// A transfer of `amount` from `sender` to `receiver`, paying `fee`.
///
/// Transactions are immutable once created. The fee is the priority key:
/// a higher fee is served first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    receiver: String,
    amount: i64,
    fee: i64,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: i64,
        fee: i64,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            fee,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    /// Get the leaf digest of this transaction: the hash of its canonical
    /// `"<sender> <receiver> <amount> <fee>"` form.
    pub fn hash(&self) -> Digest {
        hash(self.to_string().as_bytes())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.sender, self.receiver, self.amount, self.fee)
    }
}

impl FromStr for Transaction {
    type Err = TransactionError;

    /// Parse a single whitespace-separated record.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        match fields.as_slice() {
            [sender, receiver, amount, fee] => Ok(Self::new(
                *sender,
                *receiver,
                parse_field("amount", amount)?,
                parse_field("fee", fee)?,
            )),
            _ => Err(TransactionError::FieldCount(fields.len())),
        }
    }
}

/// Parse an integer field of a transaction record.
pub(crate) fn parse_field(field: &'static str, value: &str) -> Result<i64, TransactionError> {
    value.parse().map_err(|_| TransactionError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
