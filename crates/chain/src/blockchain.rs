//! Batching of a priority line into sealed blocks.
//!
//! Blocks are filled greedily from the front of the line until their
//! cumulative fee reaches the configured threshold. Every emitted block is
//! sealed with its Merkle root, and the tree is kept for proof extraction.

use crate::priority_line::PriorityLine;
use merklechain_core::{Block, BlockError, MerkleError, MerkleProof, MerkleTree, Transaction};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while assembling the chain.
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("block error: {0}")]
    Block(#[from] BlockError),

    #[error("merkle error: {0}")]
    Merkle(#[from] MerkleError),
}

pub type Result<T> = std::result::Result<T, BlockchainError>;

/// Blockchain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// Minimum cumulative fee that closes a block.
    pub threshold: i64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self { threshold: 20 }
    }
}

/// An append-once sequence of sealed blocks.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    trees: Vec<MerkleTree>,
}

impl Blockchain {
    /// Drain `line` into blocks.
    ///
    /// A block closes as soon as its fees reach `config.threshold`, or when the
    /// line runs dry. The last block may fall short of the threshold; no
    /// transaction is dropped.
    pub fn new(mut line: PriorityLine, config: &BlockchainConfig) -> Result<Self> {
        let mut blocks = Vec::new();
        let mut trees = Vec::new();

        while let Ok(first) = line.dequeue() {
            let mut block = Block::new();
            let mut fees = first.fee();
            block.add_transaction(first)?;

            while fees < config.threshold {
                let Ok(tx) = line.dequeue() else {
                    break;
                };
                fees = fees.saturating_add(tx.fee());
                block.add_transaction(tx)?;
            }

            let tree = MerkleTree::new(&mut block)?;

            debug!(
                index = blocks.len(),
                transactions = block.tx_count(),
                fees,
                "sealed block"
            );
            blocks.push(block);
            trees.push(tree);
        }

        info!(blocks = blocks.len(), threshold = config.threshold, "built blockchain");
        Ok(Self { blocks, trees })
    }

    /// Get the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get a block by its position in creation order.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Get the Merkle tree built for the block at `index`.
    pub fn tree(&self, index: usize) -> Option<&MerkleTree> {
        self.trees.get(index)
    }

    /// Iterate over blocks in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// The block holding the most transactions (the earliest one on ties).
    pub fn largest_block(&self) -> Option<&Block> {
        self.blocks
            .iter()
            .reduce(|best, block| if block.compare_size(best).is_gt() { block } else { best })
    }

    /// Find the first block containing `tx` and extract its proof.
    pub fn prove(&self, tx: &Transaction) -> Option<(usize, MerkleProof)> {
        let index = self.blocks.iter().position(|block| block.contains(tx))?;
        Some((index, self.trees[index].extract_proof(tx)))
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
