//! Extract a membership proof for one transaction.

use super::ChainArgs;
use anyhow::{Context, Result};
use clap::Args;
use merklechain_core::{Digest, MerkleProof, Transaction};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Args)]
pub struct ProveArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Transaction to prove, as "sender receiver amount fee"
    #[arg(long)]
    tx: Transaction,
}

/// Everything a verifier needs, as printed to stdout.
#[derive(Debug, Serialize)]
struct ProofReport<'a> {
    block: usize,
    root: Digest,
    transaction: &'a Transaction,
    proof: MerkleProof,
}

pub fn run(args: ProveArgs) -> Result<ExitCode> {
    let chain = args.chain.load_chain()?;
    let (block, proof) = chain
        .prove(&args.tx)
        .with_context(|| format!("Transaction \"{}\" is not in any block", args.tx))?;
    let root = chain
        .block(block)
        .and_then(|b| b.root_hash())
        .copied()
        .context("Block has no root hash")?;

    let report = ProofReport {
        block,
        root,
        transaction: &args.tx,
        proof,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(ExitCode::SUCCESS)
}
