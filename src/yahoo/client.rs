// =============================================================================
// Yahoo Finance REST client — chart history and quote summary
// =============================================================================
//
// Implements the crate's fetch interface against the public chart API.
// Responses are parsed into typed structs; bars with any null field are
// dropped rather than surfacing NaN into the series. Fetched series are
// memoized per (ticker, period, interval) for the lifetime of the client.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{PriceBar, PriceSeries};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Some endpoints reject requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; meridian/1.0)";

/// Modules requested from the quote-summary endpoint and flattened into one
/// info map.
const INFO_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData";

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    ticker: String,
    period: String,
    interval: String,
}

/// HTTP client for the Yahoo Finance chart and quote-summary APIs.
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
    cache: RwLock<HashMap<CacheKey, PriceSeries>>,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch OHLCV history for `ticker` over `period` ("1mo", "1y", ...)
    /// at `interval` ("1d", "1h", ...). Cached per argument triple.
    #[instrument(skip(self), name = "yahoo::fetch_history")]
    pub async fn fetch_history(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries> {
        let key = CacheKey {
            ticker: ticker.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
        };
        if let Some(series) = self.cache.read().get(&key) {
            debug!(ticker, "chart cache hit");
            return Ok(series.clone());
        }

        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, ticker, period, interval
        );
        let resp = self.client.get(&url).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(Error::InvalidTicker(ticker.to_string()));
        }
        let body: ChartResponse = resp.error_for_status()?.json().await?;

        let series = parse_chart(body, ticker)?;
        debug!(ticker, bars = series.len(), "chart fetched");

        self.cache.write().insert(key, series.clone());
        Ok(series)
    }

    /// Fetch the fundamental info map for `ticker`: the quote-summary
    /// modules flattened into a single key → value map.
    #[instrument(skip(self), name = "yahoo::fetch_info")]
    pub async fn fetch_info(&self, ticker: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.base_url, ticker, INFO_MODULES
        );
        let resp = self.client.get(&url).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(Error::InvalidTicker(ticker.to_string()));
        }
        let body: serde_json::Value = resp.error_for_status()?.json().await?;

        let result = body
            .pointer("/quoteSummary/result/0")
            .and_then(|v| v.as_object())
            .ok_or_else(|| Error::NoData(ticker.to_string()))?;

        // Flatten { module: { field: value, ... }, ... } into one map.
        let mut info = serde_json::Map::new();
        for module in result.values() {
            if let Some(fields) = module.as_object() {
                for (k, v) in fields {
                    info.insert(k.clone(), v.clone());
                }
            }
        }

        if info.is_empty() {
            return Err(Error::NoData(ticker.to_string()));
        }
        debug!(ticker, fields = info.len(), "info fetched");
        Ok(info)
    }
}

// -----------------------------------------------------------------------------
// Chart response payload
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize, Default)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Convert a chart payload into a `PriceSeries`, dropping bars with missing
/// fields. A provider-side error or an empty result maps onto the fetch
/// error taxonomy.
pub(crate) fn parse_chart(body: ChartResponse, ticker: &str) -> Result<PriceSeries> {
    if let Some(err) = body.chart.error {
        return Err(Error::InvalidTicker(format!(
            "{ticker}: {} ({})",
            err.description, err.code
        )));
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| Error::NoData(ticker.to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse(format!("{ticker}: missing quote block")))?;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let fields = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = fields else {
            continue;
        };
        let Some(timestamp) = Utc.timestamp_opt(ts, 0).single() else {
            continue;
        };
        bars.push(PriceBar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    if bars.is_empty() {
        return Err(Error::NoData(ticker.to_string()));
    }
    PriceSeries::new(bars)
}
