use serde::{Deserialize, Serialize};
use std::fmt;

/// The four exhaustion flags for the most recent bar of one series.
///
/// Derived and ephemeral: consumed by the scanner immediately after
/// computation, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DmSignals {
    pub nine_top: bool,
    pub thirteen_top: bool,
    pub nine_bot: bool,
    pub thirteen_bot: bool,
}

impl DmSignals {
    /// True if any of the four flags is set
    pub fn any(&self) -> bool {
        self.nine_top || self.thirteen_top || self.nine_bot || self.thirteen_bot
    }
}

/// Signal label attached to a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Dm9Top,
    Dm13Top,
    Dm9Bot,
    Dm13Bot,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Dm9Top => "DM9 Top",
            SignalKind::Dm13Top => "DM13 Top",
            SignalKind::Dm9Bot => "DM9 Bot",
            SignalKind::Dm13Bot => "DM13 Bot",
        }
    }

    /// Thirteen counts mark stronger exhaustion and get heavier emphasis
    /// in the report
    pub fn is_thirteen(&self) -> bool {
        matches!(self, SignalKind::Dm13Top | SignalKind::Dm13Bot)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flagged ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalHit {
    pub ticker: String,
    pub kind: SignalKind,
}

impl SignalHit {
    pub fn new(ticker: impl Into<String>, kind: SignalKind) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
        }
    }
}

/// Aggregated hits for one timeframe, each list sorted ascending by ticker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub tops: Vec<SignalHit>,
    pub bottoms: Vec<SignalHit>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.tops.is_empty() && self.bottoms.is_empty()
    }
}
