//! Ticker universe loading
//!
//! The universe is a plain CSV file with the symbol in the first column and
//! a header row. Anything beyond the first column is ignored.

use crate::constants::TICKER_COLUMN;
use crate::error::{Error, Result};
use crate::utils::get_ticker_file;
use std::path::Path;
use tracing::{info, warn};

/// Load the ticker universe from the configured CSV file.
///
/// A missing file yields an empty universe with a warning rather than an
/// error: the scan then produces an empty report instead of crashing.
pub fn load_universe() -> Result<Vec<String>> {
    let path = get_ticker_file();

    if !path.exists() {
        eprintln!("❌ Ticker file {} not found!", path.display());
        warn!(file = %path.display(), "Ticker universe file missing");
        return Ok(Vec::new());
    }

    let tickers = read_tickers(&path)?;
    println!("✅ Loaded {} tickers from {}", tickers.len(), path.display());
    info!(count = tickers.len(), file = %path.display(), "Loaded ticker universe");

    Ok(tickers)
}

fn read_tickers(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Io(format!("Failed to open ticker file: {}", e)))?;

    let mut tickers = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(format!("Bad ticker row: {}", e)))?;

        let symbol = match record.get(TICKER_COLUMN) {
            Some(s) => s.trim(),
            None => continue,
        };

        if !symbol.is_empty() {
            tickers.push(symbol.to_string());
        }
    }

    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_header_skipped_and_blanks_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "ticker,name").unwrap();
        writeln!(file, "BHP.AX,BHP Group").unwrap();
        writeln!(file, "  CBA.AX ,Commonwealth Bank").unwrap();
        writeln!(file, ",blank symbol").unwrap();
        writeln!(file, "WES.AX").unwrap();

        let tickers = read_tickers(&path).unwrap();
        assert_eq!(tickers, vec!["BHP.AX", "CBA.AX", "WES.AX"]);
    }

    #[test]
    fn test_empty_file_yields_empty_universe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.csv");
        std::fs::write(&path, "ticker\n").unwrap();

        let tickers = read_tickers(&path).unwrap();
        assert!(tickers.is_empty());
    }
}
