use crate::models::Interval;
use crate::services::{self, price_cache};

pub fn run() {
    println!("📊 Scanner Status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let tickers = services::load_universe()?;

    if tickers.is_empty() {
        println!("⚠️  Ticker universe is empty. Set TICKER_FILE to a universe CSV.");
    } else {
        println!("📈 Universe: {} tickers", tickers.len());
    }

    println!("\n📦 Today's price caches:");
    for interval in Interval::all() {
        let path = price_cache::cache_file_for_today(interval);
        if path.exists() {
            println!("   {} - cached ({})", interval.label(), path.display());
        } else {
            println!("   {} - not cached, next scan will fetch", interval.label());
        }
    }

    Ok(())
}
