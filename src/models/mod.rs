pub mod demark;
mod interval;
mod ohlcv;
mod signals;

pub use interval::Interval;
pub use ohlcv::PriceBar;
pub use signals::{DmSignals, ScanResult, SignalHit, SignalKind};

use std::collections::HashMap;

/// Price series for a single ticker, strictly increasing by date
pub type PriceSeries = Vec<PriceBar>;

/// Acquired market data (ticker -> price series)
pub type MarketData = HashMap<String, PriceSeries>;
