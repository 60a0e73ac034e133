use serde::{Deserialize, Serialize};
use std::fmt;

/// Scan timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// Daily candles
    Daily,
    /// Weekly candles
    Weekly,
}

impl Interval {
    /// Provider interval string (Yahoo chart API format)
    pub fn to_provider_format(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
        }
    }

    /// Lookback range requested from the provider.
    ///
    /// Weekly needs a longer range to cover the same number of bars.
    pub fn lookback_range(&self) -> &'static str {
        match self {
            Interval::Daily => "6mo",
            Interval::Weekly => "2y",
        }
    }

    /// Short label used in cache file names and report headings
    pub fn label(&self) -> &'static str {
        match self {
            Interval::Daily => "1D",
            Interval::Weekly => "1W",
        }
    }

    /// Both scan timeframes, in report order
    pub fn all() -> Vec<Interval> {
        vec![Interval::Daily, Interval::Weekly]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Daily
    }
}
