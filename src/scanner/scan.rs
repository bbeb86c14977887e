// =============================================================================
// Batch scanning — concurrent fan-out, deterministic ordering, canned scans
// =============================================================================
//
// Each ticker is scanned independently (no shared mutable state), fanned out
// through a bounded concurrent stream, and re-sorted to input order after
// collection so completion order never leaks into results. A ticker whose
// fetch fails is logged and omitted; it never aborts the batch.

use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::error::Result;
use crate::scanner::signals::{
    breakout_score, consolidation_breakout, ma_crossover_signal, near_52w_high, relative_volume,
    rsi_signal, trailing_change,
};
use crate::types::{MaCrossover, PriceSeries, RsiSignal, ScanRecord};
use crate::yahoo::SeriesSource;

/// Relative-volume floor for the golden-cross arm of the breakout filter.
const BREAKOUT_REL_VOLUME: f64 = 1.5;

/// Optional exact-match / threshold filters applied after a batch scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanFilters {
    pub volume_surge: Option<bool>,
    pub rsi_signal: Option<RsiSignal>,
    pub ma_crossover: Option<MaCrossover>,
    pub near_52w_high: Option<bool>,
    pub breaking_out: Option<bool>,
    pub min_relative_volume: Option<f64>,
    pub min_breakout_score: Option<i32>,
}

impl ScanFilters {
    pub fn matches(&self, record: &ScanRecord) -> bool {
        if let Some(want) = self.volume_surge {
            if record.volume_surge != want {
                return false;
            }
        }
        if let Some(want) = self.rsi_signal {
            if record.rsi_signal != want {
                return false;
            }
        }
        if let Some(want) = self.ma_crossover {
            if record.ma_crossover != want {
                return false;
            }
        }
        if let Some(want) = self.near_52w_high {
            if record.near_52w_high != want {
                return false;
            }
        }
        if let Some(want) = self.breaking_out {
            if record.consolidation.breaking_out != want {
                return false;
            }
        }
        if let Some(min) = self.min_relative_volume {
            if !record.relative_volume.map_or(false, |rv| rv >= min) {
                return false;
            }
        }
        if let Some(min) = self.min_breakout_score {
            if record.breakout_score < min {
                return false;
            }
        }
        true
    }
}

/// Derive the full signal set for one already-fetched series.
pub fn build_record(ticker: &str, series: &PriceSeries, config: &ScanConfig) -> Result<ScanRecord> {
    let rel_volume = relative_volume(series, config.volume_lookback);
    let volume_surge = rel_volume.map_or(false, |rv| rv >= config.volume_surge_threshold);

    let (rsi_sig, rsi_value) = rsi_signal(
        series,
        config.rsi_period,
        config.rsi_oversold,
        config.rsi_overbought,
    )?;

    let crossover = ma_crossover_signal(series, config.crossover_lookback)?;
    let near_high = near_52w_high(series, config.near_high_threshold_pct);
    let consolidation = consolidation_breakout(
        series,
        config.consolidation_window,
        config.consolidation_threshold,
    )?;

    Ok(ScanRecord {
        ticker: ticker.to_string(),
        current_price: series.last().close,
        relative_volume: rel_volume,
        volume_surge,
        rsi_signal: rsi_sig,
        rsi_value,
        ma_crossover: crossover,
        near_52w_high: near_high,
        consolidation,
        price_change_5d: trailing_change(series, 5),
        price_change_20d: trailing_change(series, 20),
        breakout_score: breakout_score(consolidation, near_high, volume_surge, crossover),
    })
}

/// Scan a single ticker. Fetch errors propagate; a series shorter than
/// `config.min_history` yields `Ok(None)` (insufficient history policy).
pub async fn scan_ticker<S: SeriesSource>(
    source: &S,
    ticker: &str,
    config: &ScanConfig,
) -> Result<Option<ScanRecord>> {
    let series = source
        .fetch_series(ticker, &config.period, &config.interval)
        .await?;

    if series.len() < config.min_history {
        debug!(
            ticker,
            bars = series.len(),
            min = config.min_history,
            "insufficient history"
        );
        return Ok(None);
    }

    Ok(Some(build_record(ticker, &series, config)?))
}

/// Scan many tickers concurrently (bounded by
/// `config.max_concurrent_fetches`) and return records in input order.
///
/// Failed or too-short tickers are logged and omitted; a scan where every
/// ticker fails returns an empty vector, not an error.
pub async fn scan_tickers<S: SeriesSource + Sync>(
    source: &S,
    tickers: &[String],
    config: &ScanConfig,
    filters: Option<&ScanFilters>,
) -> Vec<ScanRecord> {
    let concurrency = config.max_concurrent_fetches.max(1);

    let mut indexed: Vec<(usize, ScanRecord)> =
        stream::iter(tickers.iter().enumerate().map(|(idx, ticker)| async move {
            match scan_ticker(source, ticker, config).await {
                Ok(Some(record)) => Some((idx, record)),
                Ok(None) => {
                    warn!(ticker = %ticker, "skipping ticker: insufficient history");
                    None
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "skipping ticker: scan failed");
                    None
                }
            }
        }))
        .buffer_unordered(concurrency)
        .filter_map(|r| async move { r })
        .collect()
        .await;

    // Completion order is nondeterministic; restore the input order.
    indexed.sort_by_key(|(idx, _)| *idx);
    let mut records: Vec<ScanRecord> = indexed.into_iter().map(|(_, r)| r).collect();

    if let Some(filters) = filters {
        records.retain(|r| filters.matches(r));
    }
    records
}

// =============================================================================
// Canned scans over an already-scanned record set
// =============================================================================

/// Breakout candidates: breaking out of consolidation, or near the 52-week
/// high on a volume surge, or a fresh golden cross with elevated volume.
/// Sorted descending by composite score; ties keep scan order (stable sort).
pub fn find_breakout_candidates(records: &[ScanRecord]) -> Vec<ScanRecord> {
    let mut out: Vec<ScanRecord> = records
        .iter()
        .filter(|r| {
            r.consolidation.breaking_out
                || (r.near_52w_high && r.volume_surge)
                || (r.ma_crossover == MaCrossover::GoldenCross
                    && r.relative_volume.map_or(false, |rv| rv > BREAKOUT_REL_VOLUME))
        })
        .cloned()
        .collect();
    out.sort_by_key(|r| std::cmp::Reverse(r.breakout_score));
    out
}

/// Tickers with relative volume at or above `min_rel_volume`, sorted
/// descending by relative volume.
pub fn find_high_volume_movers(records: &[ScanRecord], min_rel_volume: f64) -> Vec<ScanRecord> {
    let mut out: Vec<ScanRecord> = records
        .iter()
        .filter(|r| r.relative_volume.map_or(false, |rv| rv >= min_rel_volume))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        let (ra, rb) = (
            a.relative_volume.unwrap_or(f64::MIN),
            b.relative_volume.unwrap_or(f64::MIN),
        );
        rb.total_cmp(&ra)
    });
    out
}

/// Oversold tickers, sorted ascending by RSI value.
pub fn find_oversold(records: &[ScanRecord]) -> Vec<ScanRecord> {
    let mut out: Vec<ScanRecord> = records
        .iter()
        .filter(|r| r.rsi_signal == RsiSignal::Oversold)
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        let (ra, rb) = (
            a.rsi_value.unwrap_or(f64::MAX),
            b.rsi_value.unwrap_or(f64::MAX),
        );
        ra.total_cmp(&rb)
    });
    out
}

/// Tickers with a recent golden cross, in scan order.
pub fn find_golden_cross(records: &[ScanRecord]) -> Vec<ScanRecord> {
    records
        .iter()
        .filter(|r| r.ma_crossover == MaCrossover::GoldenCross)
        .cloned()
        .collect()
}
