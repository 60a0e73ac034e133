pub mod price_cache;
pub mod report;
pub mod scanner;
pub mod ticker_loader;
pub mod yahoo;

pub use price_cache::load_or_fetch;
pub use report::render_report;
pub use scanner::scan_timeframe;
pub use ticker_loader::load_universe;
pub use yahoo::{YahooClient, YahooError};
