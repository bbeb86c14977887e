// =============================================================================
// Market data fetch collaborator
// =============================================================================
//
// The scanner consumes bar history through the narrow `SeriesSource` seam so
// batch scans can be driven by the HTTP client in production and by canned
// fixtures in tests.

pub mod client;

pub use client::YahooClient;

use std::future::Future;

use crate::error::Result;
use crate::types::PriceSeries;

/// Anything that can produce OHLCV history for a ticker.
pub trait SeriesSource {
    fn fetch_series(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}

impl SeriesSource for YahooClient {
    fn fetch_series(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> impl Future<Output = Result<PriceSeries>> + Send {
        self.fetch_history(ticker, period, interval)
    }
}
