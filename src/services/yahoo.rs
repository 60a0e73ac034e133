//! Yahoo Finance chart API client
//!
//! Fetches historical closes from the v8 chart endpoint, one request per
//! ticker, with group-level pacing so a full universe scan stays inside the
//! provider's informal rate limits. Bars with an absent close are dropped at
//! parse time; downstream code only ever sees finite closes.

use crate::constants::{FETCH_BATCH_SIZE, FETCH_PAUSE_MS};
use crate::models::{Interval, MarketData, PriceBar, PriceSeries};
use chrono::DateTime;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Base URL for the Yahoo Finance chart API
const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Some endpoints reject requests without a browser-ish user agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) demark-scanner/0.1";

/// Yahoo chart API error types
#[derive(Debug)]
pub enum YahooError {
    Http(ReqwestError),
    Serialization(serde_json::Error),
    InvalidResponse(String),
    NoData(String),
}

impl From<ReqwestError> for YahooError {
    fn from(error: ReqwestError) -> Self {
        YahooError::Http(error)
    }
}

impl From<serde_json::Error> for YahooError {
    fn from(error: serde_json::Error) -> Self {
        YahooError::Serialization(error)
    }
}

impl std::fmt::Display for YahooError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YahooError::Http(e) => write!(f, "HTTP error: {}", e),
            YahooError::Serialization(e) => write!(f, "Serialization error: {}", e),
            YahooError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
            YahooError::NoData(s) => write!(f, "No data for {}", s),
        }
    }
}

impl std::error::Error for YahooError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            YahooError::Http(e) => Some(e),
            YahooError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

/// Chart API response envelope
#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, serde::Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, serde::Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance history client
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self, YahooError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(StdDuration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the close history for a single ticker.
    ///
    /// Returns bars ordered by date with duplicate dates collapsed
    /// (last wins) and bars without a close dropped.
    pub async fn get_history(
        &self,
        ticker: &str,
        interval: Interval,
    ) -> Result<PriceSeries, YahooError> {
        let url = format!(
            "{}/{}?interval={}&range={}",
            BASE_URL,
            ticker,
            interval.to_provider_format(),
            interval.lookback_range()
        );

        debug!(ticker = ticker, interval = %interval, "Requesting chart history");

        let response = self.send_chart_request(&url).await?;

        let results = match response.chart.result {
            Some(results) if !results.is_empty() => results,
            _ => {
                if let Some(err) = response.chart.error {
                    return Err(YahooError::InvalidResponse(err.to_string()));
                }
                return Err(YahooError::NoData(ticker.to_string()));
            }
        };

        let result = &results[0];
        let timestamps = result
            .timestamp
            .as_deref()
            .ok_or_else(|| YahooError::NoData(ticker.to_string()))?;
        let closes = result
            .indicators
            .quote
            .first()
            .and_then(|q| q.close.as_deref())
            .ok_or_else(|| YahooError::NoData(ticker.to_string()))?;

        if timestamps.len() != closes.len() {
            return Err(YahooError::InvalidResponse(format!(
                "timestamp/close length mismatch for {}: {} vs {}",
                ticker,
                timestamps.len(),
                closes.len()
            )));
        }

        let mut series: PriceSeries = Vec::with_capacity(timestamps.len());
        for (ts, close) in timestamps.iter().zip(closes.iter()) {
            let close = match close {
                Some(c) if c.is_finite() => *c,
                _ => continue, // absent close: bar excluded
            };
            let date = match DateTime::from_timestamp(*ts, 0) {
                Some(dt) => dt.date_naive(),
                None => continue,
            };

            // Provider bars arrive ordered; a repeated date replaces the
            // earlier bar so the series stays strictly increasing
            match series.last() {
                Some(last) if last.date == date => {
                    let idx = series.len() - 1;
                    series[idx] = PriceBar::new(date, close);
                }
                _ => series.push(PriceBar::new(date, close)),
            }
        }

        if series.is_empty() {
            return Err(YahooError::NoData(ticker.to_string()));
        }

        Ok(series)
    }

    /// Fetch history for a whole universe in paced concurrent groups.
    ///
    /// Tickers that fail are logged and omitted from the result map; a
    /// single bad symbol never aborts the batch.
    pub async fn batch_history(&self, tickers: &[String], interval: Interval) -> MarketData {
        let mut all_data = MarketData::new();

        if tickers.is_empty() {
            return all_data;
        }

        let groups: Vec<&[String]> = tickers.chunks(FETCH_BATCH_SIZE).collect();
        let total_groups = groups.len();

        info!(
            ticker_count = tickers.len(),
            interval = %interval,
            groups = total_groups,
            "Fetching price history"
        );

        for (group_idx, group) in groups.iter().enumerate() {
            let mut tasks = Vec::with_capacity(group.len());

            for ticker in group.iter() {
                let client = self.clone();
                let ticker = ticker.clone();

                tasks.push(tokio::spawn(async move {
                    let result = client.get_history(&ticker, interval).await;
                    (ticker, result)
                }));
            }

            for task_result in futures::future::join_all(tasks).await {
                match task_result {
                    Ok((ticker, Ok(series))) => {
                        all_data.insert(ticker, series);
                    }
                    Ok((ticker, Err(e))) => {
                        warn!(ticker = ticker, error = %e, "Skipping ticker - fetch failed");
                    }
                    Err(e) => {
                        warn!(error = %e, "Fetch task join error");
                    }
                }
            }

            debug!(
                group = group_idx + 1,
                total_groups = total_groups,
                acquired = all_data.len(),
                "Fetch group completed"
            );

            // Pause between groups to respect provider rate limits
            if group_idx + 1 < total_groups {
                sleep(StdDuration::from_millis(FETCH_PAUSE_MS)).await;
            }
        }

        info!(
            acquired = all_data.len(),
            requested = tickers.len(),
            "Price history fetch complete"
        );

        all_data
    }

    async fn send_chart_request(&self, url: &str) -> Result<ChartResponse, YahooError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::InvalidResponse(format!(
                "HTTP {} from provider",
                status
            )));
        }
        Ok(response.json::<ChartResponse>().await?)
    }
}
