//! Check a membership proof without access to the tree.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use merklechain_core::{verify_transaction, Digest, MerkleProof, Transaction};
use std::process::ExitCode;

/// Exit status when the proof does not reproduce the root.
const REJECTED: u8 = 2;

#[derive(Args)]
pub struct VerifyArgs {
    /// Transaction to check, as "sender receiver amount fee"
    #[arg(long)]
    tx: Transaction,

    /// Root hash of the block (hex)
    #[arg(long)]
    root: Digest,

    /// Sibling hashes, deepest first (hex)
    #[arg(long, num_args = 0..)]
    proof: Vec<Digest>,
}

pub fn run(args: VerifyArgs) -> Result<ExitCode> {
    let proof = MerkleProof::new(args.proof);

    if verify_transaction(&args.tx, &proof, &args.root) {
        println!("{}  Transaction verified", "✓".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}  Proof does not match root", "✗".red().bold());
        Ok(ExitCode::from(REJECTED))
    }
}
