// =============================================================================
// Scan configuration — tunable thresholds with atomic save
// =============================================================================
//
// Every tunable of the scan pipeline lives here. Persistence uses an atomic
// tmp + rename pattern to prevent corruption on crash, and all fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_period() -> String {
    "1y".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_min_history() -> usize {
    50
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_volume_lookback() -> usize {
    20
}

fn default_volume_surge_threshold() -> f64 {
    2.0
}

fn default_consolidation_window() -> usize {
    20
}

fn default_consolidation_threshold() -> f64 {
    0.05
}

fn default_near_high_threshold_pct() -> f64 {
    5.0
}

fn default_crossover_lookback() -> usize {
    5
}

fn default_max_concurrent_fetches() -> usize {
    8
}

/// A sample of large-cap tickers, the default scan universe.
fn default_tickers() -> Vec<String> {
    SP500_SAMPLE.iter().map(|s| s.to_string()).collect()
}

/// Common ticker lists for scanning.
pub const SP500_SAMPLE: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM", "V", "JNJ", "WMT", "PG",
    "MA", "UNH", "HD", "DIS", "BAC", "XOM",
];

pub const ETF_LIST: &[&str] = &[
    "SPY", "QQQ", "IWM", "DIA", "VTI", "VOO", "ARKK", "XLF", "XLE", "XLK", "XLV", "XLP", "XLI",
    "XLY", "XLC", "XLRE",
];

// =============================================================================
// ScanConfig
// =============================================================================

/// Top-level configuration for the scan pipeline.
///
/// Every field has a serde default so that older JSON files missing new
/// fields still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    // --- Fetch window --------------------------------------------------------

    /// History period requested from the data provider (e.g. "1y").
    #[serde(default = "default_period")]
    pub period: String,

    /// Bar interval requested from the data provider (e.g. "1d").
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Tickers skipped when their fetched history is shorter than this.
    #[serde(default = "default_min_history")]
    pub min_history: usize,

    // --- Signal thresholds ---------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// Bars of trailing volume averaged for relative volume (excluding the
    /// current bar).
    #[serde(default = "default_volume_lookback")]
    pub volume_lookback: usize,

    /// Relative volume at or above this counts as a surge.
    #[serde(default = "default_volume_surge_threshold")]
    pub volume_surge_threshold: f64,

    #[serde(default = "default_consolidation_window")]
    pub consolidation_window: usize,

    /// Consolidation range threshold as a fraction of the midpoint.
    #[serde(default = "default_consolidation_threshold")]
    pub consolidation_threshold: f64,

    /// "Near the 52-week high" when within this many percent below it.
    #[serde(default = "default_near_high_threshold_pct")]
    pub near_high_threshold_pct: f64,

    /// How many recent bars are inspected for golden/death cross flags.
    #[serde(default = "default_crossover_lookback")]
    pub crossover_lookback: usize,

    // --- Batch behavior ------------------------------------------------------

    /// Upper bound on concurrent fetches during a batch scan.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// The scan universe.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            interval: default_interval(),
            min_history: default_min_history(),
            rsi_period: default_rsi_period(),
            rsi_oversold: default_rsi_oversold(),
            rsi_overbought: default_rsi_overbought(),
            volume_lookback: default_volume_lookback(),
            volume_surge_threshold: default_volume_surge_threshold(),
            consolidation_window: default_consolidation_window(),
            consolidation_threshold: default_consolidation_threshold(),
            near_high_threshold_pct: default_near_high_threshold_pct(),
            crossover_lookback: default_crossover_lookback(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            tickers: default_tickers(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scan config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse scan config from {}", path.display()))?;

        info!(
            path = %path.display(),
            tickers = config.tickers.len(),
            period = %config.period,
            "scan config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise scan config")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "scan config saved (atomic)");
        Ok(())
    }
}
