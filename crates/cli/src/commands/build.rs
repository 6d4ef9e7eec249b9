//! Batch transactions into blocks and show each block's tree summary.

use super::ChainArgs;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::process::ExitCode;

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    chain: ChainArgs,
}

pub fn run(args: BuildArgs) -> Result<ExitCode> {
    let config = args.chain.config()?;
    let chain = args.chain.load_chain()?;

    println!();
    println!("{}", "Blockchain:".bold().cyan());
    println!("  Threshold: {}", config.threshold.to_string().bright_cyan());
    println!("  Blocks:    {}", chain.len().to_string().bright_cyan());
    println!();

    for (index, block) in chain.iter().enumerate() {
        let root = block
            .root_hash()
            .map(|root| root.to_hex())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {} {} {}",
            format!("#{}", index).bright_black(),
            root.bright_yellow(),
            format!("({} txs, {} fees)", block.tx_count(), block.total_fees()).bright_black()
        );

        if let Some(tree) = chain.tree(index) {
            println!(
                "     height {}  inner nodes {}  leaves {}",
                tree.height(),
                tree.inner_node_count(),
                tree.leaf_count()
            );
        }
        for tx in block {
            println!("     {}", tx.to_string().bright_black());
        }
    }

    if let Some(largest) = chain.largest_block() {
        println!();
        println!(
            "  Largest block holds {} transactions",
            largest.tx_count().to_string().bright_cyan()
        );
    }
    println!();

    Ok(ExitCode::SUCCESS)
}
