//! Loading transactions from whitespace-delimited text.
//!
//! Each record is four tokens, `<sender> <receiver> <amount> <fee>`. Records
//! are read as a flat token stream, so one record may span several lines.

use crate::priority_line::PriorityLine;
use merklechain_core::Transaction;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading transactions.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("transaction source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed transaction record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Parse every record in `input` into a priority line.
pub fn parse_transactions(input: &str) -> Result<PriorityLine> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut line = PriorityLine::new();

    for (record, chunk) in tokens.chunks(4).enumerate() {
        let tx = chunk
            .join(" ")
            .parse::<Transaction>()
            .map_err(|e| IngestError::MalformedRecord {
                record,
                reason: e.to_string(),
            })?;
        line.enqueue(tx);
    }

    debug!(transactions = line.len(), "parsed transactions");
    Ok(line)
}

/// Read and parse the transaction file at `path`.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<PriorityLine> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transactions(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_records() {
        let line = parse_transactions("alice bob 10 2\ncarol dave 20 5\n").unwrap();
        assert_eq!(line.len(), 2);
        assert_eq!(line.peek().unwrap(), &Transaction::new("carol", "dave", 20, 5));
    }

    #[test]
    fn test_records_may_span_lines() {
        let line = parse_transactions("alice\nbob 10\n2 carol dave\n20\n5").unwrap();
        let senders: Vec<&str> = line.iter().map(Transaction::sender).collect();
        assert_eq!(senders, vec!["carol", "alice"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_transactions("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_record() {
        let err = parse_transactions("alice bob 10 2 carol dave 20").unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { record: 1, .. }));
    }

    #[test]
    fn test_bad_number() {
        let err = parse_transactions("alice bob ten 2").unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { record: 0, .. }));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sender4 receiver4 45123 9").unwrap();
        writeln!(file, "sender7 receiver7 12045 7").unwrap();

        let line = load_transactions(file.path()).unwrap();
        assert_eq!(line.len(), 2);
        assert_eq!(line.peek().unwrap().fee(), 9);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_transactions(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, IngestError::SourceUnavailable { .. }));
    }
}
