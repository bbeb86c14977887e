// =============================================================================
// Meridian — technical, pattern, and options analytics over price series
// =============================================================================
//
// Core pipeline: external OHLCV series -> indicator engine -> pattern engine
// -> per-ticker signal extraction -> multi-ticker scan aggregation with
// composite scoring. The options module is an independent closed-form
// pricing component. Presentation, raw-data retrieval internals, and export
// formats live outside this crate.

pub mod config;
pub mod error;
pub mod frame;
pub mod fundamental;
pub mod indicators;
pub mod options;
pub mod patterns;
pub mod scanner;
pub mod series;
pub mod types;
pub mod yahoo;

pub use config::ScanConfig;
pub use error::{Error, Result};
pub use frame::{add_indicators, add_patterns, IndicatorFrame, PatternFrame};
pub use options::{compute_greeks, GreeksResult, OptionQuote, OptionType};
pub use scanner::{
    find_breakout_candidates, find_golden_cross, find_high_volume_movers, find_oversold,
    scan_ticker, scan_tickers, ScanFilters,
};
pub use types::{
    ConsolidationStatus, MaCrossover, PriceBar, PriceSeries, RsiSignal, ScanRecord,
};
pub use yahoo::{SeriesSource, YahooClient};
