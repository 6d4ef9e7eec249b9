//! Fee-ordered line of pending transactions.
//!
//! The line holds transactions waiting to be batched into blocks, highest fee
//! at the front.

use merklechain_core::Transaction;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors that can occur during priority line operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriorityLineError {
    #[error("priority line is empty")]
    EmptyContainer,

    #[error("index {index} out of range (line holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PriorityLineError>;

/// A max-priority queue of transactions keyed by fee.
///
/// Transactions with equal fees leave in the order they arrived.
#[derive(Debug, Clone, Default)]
pub struct PriorityLine {
    line: VecDeque<Transaction>,
}

impl PriorityLine {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of transactions in the line.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Check if the line is empty.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Insert a transaction ahead of the first one paying a strictly lower fee.
    pub fn enqueue(&mut self, tx: Transaction) {
        match self.line.iter().position(|queued| queued.fee() < tx.fee()) {
            Some(index) => self.line.insert(index, tx),
            None => self.line.push_back(tx),
        }
    }

    /// Remove and return the highest-fee transaction.
    pub fn dequeue(&mut self) -> Result<Transaction> {
        self.line.pop_front().ok_or(PriorityLineError::EmptyContainer)
    }

    /// Get the highest-fee transaction without removing it.
    pub fn peek(&self) -> Result<&Transaction> {
        self.line.front().ok_or(PriorityLineError::EmptyContainer)
    }

    /// Get the transaction at `index` in priority order.
    pub fn get(&self, index: usize) -> Result<&Transaction> {
        self.line.get(index).ok_or(PriorityLineError::IndexOutOfRange {
            index,
            len: self.line.len(),
        })
    }

    /// Iterate in priority order, highest fee first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Transaction> {
        self.line.iter()
    }

    /// Sum of the fees of every queued transaction, saturating at the bounds
    /// of `i64`.
    pub fn total_fees(&self) -> i64 {
        self.line
            .iter()
            .map(Transaction::fee)
            .fold(0, i64::saturating_add)
    }
}

impl Extend<Transaction> for PriorityLine {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for tx in iter {
            self.enqueue(tx);
        }
    }
}

impl FromIterator<Transaction> for PriorityLine {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut line = Self::new();
        line.extend(iter);
        line
    }
}

impl<'a> IntoIterator for &'a PriorityLine {
    type Item = &'a Transaction;
    type IntoIter = std::collections::vec_deque::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(name: &str, fee: i64) -> Transaction {
        Transaction::new(name, "receiver", 100, fee)
    }

    #[test]
    fn test_dequeue_highest_fee_first() {
        let mut line = PriorityLine::new();
        for (name, fee) in [("a", 9), ("b", 7), ("c", 6), ("d", 8)] {
            line.enqueue(tx(name, fee));
        }

        let fees: Vec<i64> = std::iter::from_fn(|| line.dequeue().ok())
            .map(|t| t.fee())
            .collect();
        assert_eq!(fees, vec![9, 8, 7, 6]);
        assert!(line.is_empty());
    }

    #[test]
    fn test_equal_fees_keep_arrival_order() {
        let line: PriorityLine = vec![
            tx("first", 5),
            tx("high", 9),
            tx("second", 5),
            tx("third", 5),
        ]
        .into_iter()
        .collect();

        let senders: Vec<&str> = line.iter().map(Transaction::sender).collect();
        assert_eq!(senders, vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut line = PriorityLine::new();
        line.enqueue(tx("low", 1));
        line.enqueue(tx("high", 3));

        assert_eq!(line.peek().unwrap().sender(), "high");
        assert_eq!(line.len(), 2);
        assert_eq!(line.dequeue().unwrap().sender(), "high");
        assert_eq!(line.peek().unwrap().sender(), "low");
    }

    #[test]
    fn test_empty_line_errors() {
        let mut line = PriorityLine::new();
        assert_eq!(line.dequeue(), Err(PriorityLineError::EmptyContainer));
        assert_eq!(line.peek(), Err(PriorityLineError::EmptyContainer));
    }

    #[test]
    fn test_indexed_access() {
        let line: PriorityLine = vec![tx("a", 1), tx("b", 2)].into_iter().collect();
        assert_eq!(line.get(0).unwrap().sender(), "b");
        assert_eq!(line.get(1).unwrap().sender(), "a");
        assert_eq!(
            line.get(2),
            Err(PriorityLineError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_negative_fees_sort_last() {
        let line: PriorityLine = vec![tx("neg", -3), tx("zero", 0), tx("pos", 2)]
            .into_iter()
            .collect();
        let fees: Vec<i64> = line.iter().map(Transaction::fee).collect();
        assert_eq!(fees, vec![2, 0, -3]);
        assert_eq!(line.total_fees(), -1);
    }

    #[test]
    fn test_total_fees_saturate() {
        let line: PriorityLine = vec![tx("a", i64::MAX), tx("b", i64::MAX)]
            .into_iter()
            .collect();
        assert_eq!(line.total_fees(), i64::MAX);
    }
}
