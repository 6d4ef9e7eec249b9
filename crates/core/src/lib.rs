//! Core primitives for merklechain.
//!
//! This crate provides the fundamental types used throughout the chain:
//! - SHA-256 digests and the pairwise combine used by Merkle nodes
//! - Fee-carrying transactions
//! - Blocks and their one-time Merkle root
//! - Merkle trees, traversals and membership proofs

pub mod block;
pub mod hash;
pub mod merkle;
pub mod proof;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use block::{Block, BlockError};
pub use hash::{dummy_leaf, hash, hash_pair, Digest, DUMMY_PAYLOAD};
pub use merkle::{MerkleError, MerkleTree, Order};
pub use proof::{verify_transaction, MerkleProof};
pub use transaction::{Transaction, TransactionError};
