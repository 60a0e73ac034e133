//! Shared constants: universe CSV layout, signal thresholds, fetch pacing.
//!
//! ## Ticker universe CSV
//!
//! One ticker per row, first column, with a header row:
//!
//! ```csv
//! ticker,name
//! BHP.AX,BHP Group
//! CBA.AX,Commonwealth Bank
//! ```
//!
//! Only the first column is read; everything else is ignored.

/// Column index of the ticker symbol in the universe CSV (0-indexed)
pub const TICKER_COLUMN: usize = 0;

/// Exhaustion count thresholds (exact match, not at-least)
pub const NINE_COUNT: i32 = 9;
pub const THIRTEEN_COUNT: i32 = 13;

/// Lag of the close-vs-close comparison, in bars
pub const COMPARISON_LAG: usize = 4;

/// Minimum series length for a meaningful signal.
///
/// Policy threshold, not a mathematical minimum: the comparison window is
/// only 4 bars, but the reset lookback needs enough history to be
/// non-trivial. Shorter series produce an all-false result, not an error.
pub const MIN_SERIES_LEN: usize = 20;

/// Tickers fetched per concurrent group
pub const FETCH_BATCH_SIZE: usize = 50;

/// Pause between fetch groups, to stay friendly with the provider
pub const FETCH_PAUSE_MS: u64 = 1500;
