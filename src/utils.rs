use std::path::PathBuf;

/// Get the ticker universe CSV path from environment variable or use default
pub fn get_ticker_file() -> PathBuf {
    std::env::var("TICKER_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("asx_cache.csv"))
}

/// Get the price cache directory from environment variable or use default
pub fn get_price_cache_dir() -> PathBuf {
    std::env::var("PRICE_CACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Get the report output directory from environment variable or use default
pub fn get_report_dir() -> PathBuf {
    std::env::var("REPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("docs"))
}
