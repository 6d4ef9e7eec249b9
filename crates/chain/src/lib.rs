//! Transaction batching for merklechain.
//!
//! This crate turns a stream of fee-paying transactions into sealed blocks:
//! - **Priority line**: pending transactions, highest fee first
//! - **Ingestion**: loading transactions from text files
//! - **Blockchain**: threshold batching, sealing and proof lookup
//!
//! # Example
//!
//! ```rust
//! use merklechain_chain::{parse_transactions, Blockchain, BlockchainConfig};
//! use merklechain_core::verify_transaction;
//!
//! let line = parse_transactions("alice bob 10 12\ncarol dave 5 9\n").unwrap();
//! let chain = Blockchain::new(line, &BlockchainConfig { threshold: 20 }).unwrap();
//!
//! let block = chain.block(0).unwrap();
//! let tx = block.transaction(1).unwrap();
//! let (index, proof) = chain.prove(tx).unwrap();
//! assert_eq!(index, 0);
//! assert!(verify_transaction(tx, &proof, block.root_hash().unwrap()));
//! ```

pub mod blockchain;
pub mod ingest;
pub mod priority_line;

// Re-export commonly used types
pub use blockchain::{Blockchain, BlockchainConfig, BlockchainError};
pub use ingest::{load_transactions, parse_transactions, IngestError};
pub use priority_line::{PriorityLine, PriorityLineError};
