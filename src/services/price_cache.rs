//! Date-keyed price cache
//!
//! Memoizes one day's fetched history per timeframe so repeated scans on
//! the same UTC day skip the network entirely. The file name carries the
//! timeframe label and the date, so stale files are simply never read
//! again and can be cleaned up by hand (or a cron job) at leisure.

use crate::error::{Error, Result};
use crate::models::{Interval, MarketData};
use crate::services::yahoo::YahooClient;
use crate::utils::get_price_cache_dir;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

/// Cache file path for one timeframe on one UTC date
pub fn cache_file_path(interval: Interval, date: NaiveDate) -> PathBuf {
    get_price_cache_dir().join(format!(
        "price_cache_{}_{}.json",
        interval.label(),
        date.format("%Y-%m-%d")
    ))
}

/// Today's cache file path for one timeframe
pub fn cache_file_for_today(interval: Interval) -> PathBuf {
    cache_file_path(interval, Utc::now().date_naive())
}

/// Load today's cached history, or fetch it and cache the result.
///
/// A cache write failure is logged and ignored: the fetched data is still
/// returned and the next run just fetches again.
pub async fn load_or_fetch(
    client: &YahooClient,
    tickers: &[String],
    interval: Interval,
) -> Result<MarketData> {
    let cache_file = cache_file_for_today(interval);

    if cache_file.exists() {
        println!("📦 Using cached data: {}", cache_file.display());
        return read_cache(&cache_file);
    }

    println!("🌐 Fetching fresh data for {}...", interval.label());
    let data = client.batch_history(tickers, interval).await;

    if let Err(e) = write_cache(&cache_file, &data) {
        warn!(file = %cache_file.display(), error = %e, "Failed to write price cache");
    }

    Ok(data)
}

fn read_cache(path: &PathBuf) -> Result<MarketData> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("Failed to read cache {}: {}", path.display(), e)))?;

    let data: MarketData = serde_json::from_str(&contents)
        .map_err(|e| Error::Parse(format!("Corrupt cache {}: {}", path.display(), e)))?;

    info!(file = %path.display(), tickers = data.len(), "Loaded price cache");
    Ok(data)
}

fn write_cache(path: &PathBuf, data: &MarketData) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string(data)?;
    std::fs::write(path, contents)?;

    info!(file = %path.display(), tickers = data.len(), "Wrote price cache");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceBar;

    #[test]
    fn test_cache_file_name_carries_label_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let path = cache_file_path(Interval::Weekly, date);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "price_cache_1W_2026-08-28.json");

        let path = cache_file_path(Interval::Daily, date);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "price_cache_1D_2026-08-28.json");
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price_cache_1D_2026-08-28.json");

        let mut data = MarketData::new();
        data.insert(
            "BHP.AX".to_string(),
            vec![
                PriceBar::new(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(), 45.1),
                PriceBar::new(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(), 45.8),
            ],
        );

        write_cache(&path, &data).unwrap();
        let loaded = read_cache(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["BHP.AX"], data["BHP.AX"]);
    }

    #[test]
    fn test_corrupt_cache_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price_cache_1D_2026-08-28.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(read_cache(&path), Err(Error::Parse(_))));
    }
}
