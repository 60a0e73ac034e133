use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single closing-price bar for one ticker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date of the bar (UTC calendar date)
    pub date: NaiveDate,

    /// Closing price; always finite. Bars whose close is absent in the
    /// provider payload are dropped before construction.
    pub close: f64,
}

impl PriceBar {
    /// Create a new price bar
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}
