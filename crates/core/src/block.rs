//! Blocks of transactions sealed by a Merkle root.

use crate::hash::Digest;
use crate::transaction::Transaction;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors that can occur during block operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("block root hash is already set")]
    RootAlreadySet,

    #[error("block is sealed; no more transactions can be added")]
    Sealed,

    #[error("transaction index {index} out of range (block holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered batch of transactions.
///
/// Transactions keep their arrival order. The root hash stays `None` until a
/// Merkle tree is built for the block, and cannot change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    transactions: Vec<Transaction>,
    root_hash: Option<Digest>,
}

impl Block {
    /// Create an empty, unsealed block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<(), BlockError> {
        if self.is_sealed() {
            return Err(BlockError::Sealed);
        }
        self.transactions.push(tx);
        Ok(())
    }

    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Get the transaction at `index`, in arrival order.
    pub fn transaction(&self, index: usize) -> Result<&Transaction, BlockError> {
        self.transactions.get(index).ok_or(BlockError::IndexOutOfRange {
            index,
            len: self.transactions.len(),
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn contains(&self, tx: &Transaction) -> bool {
        self.transactions.contains(tx)
    }

    /// Sum of the fees of every transaction in the block, saturating at the
    /// bounds of `i64`.
    pub fn total_fees(&self) -> i64 {
        self.transactions
            .iter()
            .map(Transaction::fee)
            .fold(0, i64::saturating_add)
    }

    /// Merkle root of the block, once sealed.
    pub fn root_hash(&self) -> Option<&Digest> {
        self.root_hash.as_ref()
    }

    /// Check if a root hash has been written.
    pub fn is_sealed(&self) -> bool {
        self.root_hash.is_some()
    }

    /// Write the Merkle root. Succeeds at most once.
    pub fn set_root_hash(&mut self, root: Digest) -> Result<(), BlockError> {
        if self.root_hash.is_some() {
            return Err(BlockError::RootAlreadySet);
        }
        self.root_hash = Some(root);
        Ok(())
    }

    /// Compare blocks by size: the block holding more transactions is larger.
    pub fn compare_size(&self, other: &Block) -> Ordering {
        self.tx_count().cmp(&other.tx_count())
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Transaction> for Block {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
            root_hash: None,
        }
    }
}
