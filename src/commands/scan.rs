use crate::error::{Error, Result};
use crate::models::{Interval, MarketData, ScanResult};
use crate::services::{self, YahooClient};
use crate::utils::get_report_dir;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

pub fn run(tickers_file: Option<PathBuf>, output: Option<PathBuf>, limit: Option<usize>) {
    println!("⏳ Starting DeMark scanner");

    if let Some(path) = tickers_file {
        // Commands resolve paths through the environment so the services
        // stay flag-free
        std::env::set_var("TICKER_FILE", &path);
    }

    match run_scan(output, limit) {
        Ok(report_path) => {
            println!("✅ Report generated: {}", report_path.display());
        }
        Err(e) => {
            eprintln!("❌ Scan failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_scan(output: Option<PathBuf>, limit: Option<usize>) -> Result<PathBuf> {
    let mut tickers = services::load_universe()?;

    if let Some(limit) = limit {
        tickers.truncate(limit);
        println!("🐛 Universe limited to first {} tickers", tickers.len());
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create runtime: {}", e)))?;

    let (daily_data, weekly_data) = runtime.block_on(async {
        let client = YahooClient::new()
            .map_err(|e| Error::Network(format!("Failed to create client: {}", e)))?;

        let daily = services::load_or_fetch(&client, &tickers, Interval::Daily).await?;
        let weekly = services::load_or_fetch(&client, &tickers, Interval::Weekly).await?;

        Ok::<(MarketData, MarketData), Error>((daily, weekly))
    })?;

    let today = Utc::now().date_naive();
    let daily_results = services::scan_timeframe(&daily_data, Interval::Daily, today);
    let weekly_results = services::scan_timeframe(&weekly_data, Interval::Weekly, today);

    log_summary(Interval::Daily, &daily_results);
    log_summary(Interval::Weekly, &weekly_results);

    let html = services::render_report(&daily_results, &weekly_results);

    let report_path = match output {
        Some(path) => path,
        None => get_report_dir().join("index.html"),
    };
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&report_path, html)?;

    Ok(report_path)
}

fn log_summary(interval: Interval, result: &ScanResult) {
    info!(
        interval = %interval,
        tops = result.tops.len(),
        bottoms = result.bottoms.len(),
        "Scan summary"
    );

    if result.is_empty() {
        println!("   {} - no signals", interval.label());
    } else {
        println!(
            "   {} - {} tops, {} bottoms",
            interval.label(),
            result.tops.len(),
            result.bottoms.len()
        );
    }
}
