//! CLI commands module.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use merklechain_chain::{load_transactions, Blockchain, BlockchainConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod build;
mod prove;
mod traverse;
mod verify;

#[derive(Subcommand)]
pub enum Commands {
    /// Batch transactions into sealed blocks
    Build(build::BuildArgs),
    /// Walk the Merkle tree of one block
    Traverse(traverse::TraverseArgs),
    /// Extract a membership proof for a transaction
    Prove(prove::ProveArgs),
    /// Check a membership proof against a block root
    Verify(verify::VerifyArgs),
}

pub fn run(cmd: Commands) -> Result<ExitCode> {
    match cmd {
        Commands::Build(args) => build::run(args),
        Commands::Traverse(args) => traverse::run(args),
        Commands::Prove(args) => prove::run(args),
        Commands::Verify(args) => verify::run(args),
    }
}

/// Options shared by every command that builds the chain from a file.
#[derive(Args)]
pub struct ChainArgs {
    /// Transaction file: whitespace-separated `sender receiver amount fee` records
    #[arg(short, long)]
    input: PathBuf,

    /// Minimum cumulative fee that closes a block (overrides the config file)
    #[arg(short, long)]
    threshold: Option<i64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ChainArgs {
    /// Resolve the batching configuration: defaults, then file, then flags.
    pub fn config(&self) -> Result<BlockchainConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BlockchainConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        Ok(config)
    }

    /// Load the transactions and batch them into a chain.
    pub fn load_chain(&self) -> Result<Blockchain> {
        let config = self.config()?;
        let line = load_transactions(&self.input)
            .with_context(|| format!("Failed to load transactions from {}", self.input.display()))?;
        Blockchain::new(line, &config).context("Failed to build blockchain")
    }
}

// Helper function to load blockchain config
fn load_config(path: &Path) -> Result<BlockchainConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn chain_args(threshold: Option<i64>, config: Option<PathBuf>) -> ChainArgs {
        ChainArgs {
            input: PathBuf::from("unused.txt"),
            threshold,
            config,
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = chain_args(None, None).config().unwrap();
        assert_eq!(config, BlockchainConfig::default());
    }

    #[test]
    fn test_config_file_then_flag() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"threshold": 35}}"#).unwrap();

        let from_file = chain_args(None, Some(file.path().to_path_buf())).config().unwrap();
        assert_eq!(from_file.threshold, 35);

        let overridden = chain_args(Some(3), Some(file.path().to_path_buf())).config().unwrap();
        assert_eq!(overridden.threshold, 3);
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "threshold = 35").unwrap();
        assert!(chain_args(None, Some(file.path().to_path_buf())).config().is_err());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = ChainArgs {
            input: dir.path().join("missing.txt"),
            threshold: None,
            config: None,
        };
        assert!(args.load_chain().is_err());
    }
}
