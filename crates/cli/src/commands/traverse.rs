//! Print the digests of one block's Merkle tree in a chosen order.

use super::ChainArgs;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use merklechain_core::{Digest, MerkleError, MerkleTree, Order};
use std::fmt;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Args)]
pub struct TraverseArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Block index, in creation order
    #[arg(short, long, default_value = "0")]
    block: usize,

    /// Traversal order: level, preorder, inorder or postorder
    #[arg(short, long, default_value = "level")]
    order: Walk,
}

/// A level-order walk or one of the depth-first orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Level,
    Depth(Order),
}

impl Walk {
    fn digests(self, tree: &MerkleTree) -> Vec<Digest> {
        match self {
            Walk::Level => tree.breadth_first_traversal(),
            Walk::Depth(order) => tree.depth_first_traversal(order),
        }
    }
}

impl FromStr for Walk {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "level" | "breadth" | "bfs" => Ok(Walk::Level),
            _ => s.parse().map(Walk::Depth),
        }
    }
}

impl fmt::Display for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Walk::Level => f.write_str("level"),
            Walk::Depth(order) => write!(f, "{}", order),
        }
    }
}

pub fn run(args: TraverseArgs) -> Result<ExitCode> {
    let chain = args.chain.load_chain()?;
    let tree = chain
        .tree(args.block)
        .with_context(|| format!("Block #{} not found (chain has {})", args.block, chain.len()))?;

    println!();
    println!(
        "{} {}",
        format!("Block #{}", args.block).bold().cyan(),
        format!("({} order)", args.order).bright_black()
    );
    println!();
    for (i, digest) in args.order.digests(tree).iter().enumerate() {
        println!("  {} {}", format!("{:>3}.", i).bright_black(), digest.to_hex().bright_yellow());
    }
    println!();

    Ok(ExitCode::SUCCESS)
}
