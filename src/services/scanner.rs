//! Per-timeframe signal scan
//!
//! Walks an already-acquired ticker -> series map, runs the exhaustion
//! count on each series, and aggregates hits into sorted Tops and Bottoms
//! lists. Acquisition lives in the scan command; keeping the scan itself
//! pure over in-memory data makes every failure mode testable.

use crate::error::{Error, Result};
use crate::models::demark::compute_dm_signals;
use crate::models::{DmSignals, Interval, MarketData, PriceBar, ScanResult, SignalHit, SignalKind};
use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, info, warn};

/// Scan one timeframe's acquired data for exhaustion signals.
///
/// `today` is the UTC calendar date of the run; it drives the weekly
/// in-progress-week trim. Per-ticker failures are logged and contribute no
/// hits. Tops and Bottoms come back sorted ascending by ticker.
pub fn scan_timeframe(price_data: &MarketData, interval: Interval, today: NaiveDate) -> ScanResult {
    println!(
        "\n🔍 Scanning {} tickers on {} timeframe...",
        price_data.len(),
        interval.label()
    );

    let mut result = ScanResult::default();

    for (ticker, series) in price_data.iter() {
        if series.is_empty() {
            debug!(ticker = ticker, "Empty series - skipped");
            continue;
        }

        match scan_ticker(series, interval, today) {
            Ok(signals) => {
                if signals.nine_top || signals.thirteen_top {
                    // Thirteen outranks nine for display; both can never be
                    // true at once but the aggregator does not rely on that
                    let kind = if signals.thirteen_top {
                        SignalKind::Dm13Top
                    } else {
                        SignalKind::Dm9Top
                    };
                    result.tops.push(SignalHit::new(ticker.clone(), kind));
                }

                if signals.nine_bot || signals.thirteen_bot {
                    let kind = if signals.thirteen_bot {
                        SignalKind::Dm13Bot
                    } else {
                        SignalKind::Dm9Bot
                    };
                    result.bottoms.push(SignalHit::new(ticker.clone(), kind));
                }
            }
            Err(e) => {
                eprintln!("⚠️ Skipping {} [{}] due to error: {}", ticker, interval.label(), e);
                warn!(ticker = ticker, interval = %interval, error = %e, "Ticker scan failed");
            }
        }
    }

    result.tops.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    result.bottoms.sort_by(|a, b| a.ticker.cmp(&b.ticker));

    info!(
        interval = %interval,
        tops = result.tops.len(),
        bottoms = result.bottoms.len(),
        "Timeframe scan complete"
    );

    result
}

/// Compute signals for one ticker's series, weekly trim applied
fn scan_ticker(series: &[PriceBar], interval: Interval, today: NaiveDate) -> Result<DmSignals> {
    let series = match interval {
        Interval::Weekly => trim_in_progress_week(series, today),
        Interval::Daily => series,
    };

    let closes = collect_closes(series)?;
    Ok(compute_dm_signals(&closes))
}

/// Drop the last bar when it falls inside the current Monday-aligned week.
///
/// An in-progress week would otherwise contribute a half-formed close to
/// the count. The boundary is `today - days_from_monday(today)` with
/// `today` in UTC, matching the provider's Monday-aligned weekly bars.
fn trim_in_progress_week(series: &[PriceBar], today: NaiveDate) -> &[PriceBar] {
    let Some(last) = series.last() else {
        return series;
    };

    let days_from_monday = u64::from(today.weekday().num_days_from_monday());
    let week_start = today
        .checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(today);

    if last.date >= week_start {
        &series[..series.len() - 1]
    } else {
        series
    }
}

/// Extract closes, rejecting series the provider or cache handed us in a
/// malformed state. These errors are per-ticker and never abort the scan.
fn collect_closes(series: &[PriceBar]) -> Result<Vec<f64>> {
    let mut closes = Vec::with_capacity(series.len());

    for (i, bar) in series.iter().enumerate() {
        if !bar.close.is_finite() {
            return Err(Error::SkipTicker(format!(
                "non-finite close at bar {}",
                i
            )));
        }
        if i > 0 && bar.date <= series[i - 1].date {
            return Err(Error::SkipTicker(format!(
                "dates not strictly increasing at bar {}",
                i
            )));
        }
        closes.push(bar.close);
    }

    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Daily bars ending the given number of days before `end`
    fn daily_series(closes: &[f64], end: NaiveDate) -> Vec<PriceBar> {
        let n = closes.len();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let back = (n - 1 - i) as u64;
                PriceBar::new(end.checked_sub_days(Days::new(back)).unwrap(), c)
            })
            .collect()
    }

    /// Closes that end on an exact 9-bar up run: flat prefix, rising tail
    fn nine_top_closes() -> Vec<f64> {
        let mut closes = vec![100.0; 15];
        for i in 1..=9 {
            closes.push(100.0 + i as f64);
        }
        closes
    }

    #[test]
    fn test_daily_scan_flags_nine_top() {
        let today = date(2026, 8, 28);
        let mut data = MarketData::new();
        data.insert("BHP.AX".to_string(), daily_series(&nine_top_closes(), today));

        let result = scan_timeframe(&data, Interval::Daily, today);
        assert_eq!(result.tops.len(), 1);
        assert_eq!(result.tops[0].ticker, "BHP.AX");
        assert_eq!(result.tops[0].kind, SignalKind::Dm9Top);
        assert!(result.bottoms.is_empty());
    }

    #[test]
    fn test_malformed_series_does_not_suppress_other_hits() {
        let today = date(2026, 8, 28);
        let mut bad = daily_series(&nine_top_closes(), today);
        bad[5].close = f64::NAN;

        let mut data = MarketData::new();
        data.insert("BAD.AX".to_string(), bad);
        data.insert("GOOD.AX".to_string(), daily_series(&nine_top_closes(), today));

        let result = scan_timeframe(&data, Interval::Daily, today);
        assert_eq!(result.tops.len(), 1);
        assert_eq!(result.tops[0].ticker, "GOOD.AX");
    }

    #[test]
    fn test_tops_sorted_ascending_by_ticker() {
        let today = date(2026, 8, 28);
        let mut data = MarketData::new();
        for ticker in ["ZIP.AX", "ANZ.AX", "MQG.AX"] {
            data.insert(ticker.to_string(), daily_series(&nine_top_closes(), today));
        }

        let result = scan_timeframe(&data, Interval::Daily, today);
        let tickers: Vec<&str> = result.tops.iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["ANZ.AX", "MQG.AX", "ZIP.AX"]);
    }

    #[test]
    fn test_empty_data_yields_empty_result() {
        let result = scan_timeframe(&MarketData::new(), Interval::Daily, date(2026, 8, 28));
        assert!(result.is_empty());
    }

    #[test]
    fn test_weekly_trim_drops_in_progress_week() {
        // Friday 2026-08-28; the current week started Monday 2026-08-24
        let today = date(2026, 8, 28);

        // Weekly bars ending on the in-progress week's Monday. Without the
        // trim the final (24th) bar completes a 9-run; with it the run is 8
        // and nothing fires.
        let closes = nine_top_closes();
        let n = closes.len();
        let series: Vec<PriceBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let back = ((n - 1 - i) * 7) as u64;
                PriceBar::new(date(2026, 8, 24).checked_sub_days(Days::new(back)).unwrap(), c)
            })
            .collect();

        let mut data = MarketData::new();
        data.insert("BHP.AX".to_string(), series.clone());

        let weekly = scan_timeframe(&data, Interval::Weekly, today);
        assert!(weekly.tops.is_empty());

        // The same series on the daily timeframe keeps its last bar
        let daily = scan_timeframe(&data, Interval::Daily, today);
        assert_eq!(daily.tops.len(), 1);
    }

    #[test]
    fn test_weekly_last_bar_from_prior_week_is_kept() {
        let today = date(2026, 8, 28);

        // Last weekly bar dated the prior Monday, before the week boundary
        let closes = nine_top_closes();
        let n = closes.len();
        let series: Vec<PriceBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let back = ((n - 1 - i) * 7) as u64;
                PriceBar::new(date(2026, 8, 17).checked_sub_days(Days::new(back)).unwrap(), c)
            })
            .collect();

        let mut data = MarketData::new();
        data.insert("BHP.AX".to_string(), series);

        let result = scan_timeframe(&data, Interval::Weekly, today);
        assert_eq!(result.tops.len(), 1);
        assert_eq!(result.tops[0].kind, SignalKind::Dm9Top);
    }

    #[test]
    fn test_tops_and_bottoms_aggregate_independently() {
        // Tops and bottoms are aggregated independently; a bottom hit from
        // one ticker sits alongside top hits from others
        let today = date(2026, 8, 28);
        let mut bot_closes = vec![100.0; 15];
        for i in 1..=9 {
            bot_closes.push(100.0 - i as f64);
        }

        let mut data = MarketData::new();
        data.insert("UP.AX".to_string(), daily_series(&nine_top_closes(), today));
        data.insert("DOWN.AX".to_string(), daily_series(&bot_closes, today));

        let result = scan_timeframe(&data, Interval::Daily, today);
        assert_eq!(result.tops.len(), 1);
        assert_eq!(result.bottoms.len(), 1);
        assert_eq!(result.tops[0].ticker, "UP.AX");
        assert_eq!(result.bottoms[0].ticker, "DOWN.AX");
        assert_eq!(result.bottoms[0].kind, SignalKind::Dm9Bot);
    }

    #[test]
    fn test_short_series_is_skipped_quietly() {
        let today = date(2026, 8, 28);
        let mut data = MarketData::new();
        data.insert("NEW.AX".to_string(), daily_series(&[1.0, 2.0, 3.0], today));

        let result = scan_timeframe(&data, Interval::Daily, today);
        assert!(result.is_empty());
    }
}
