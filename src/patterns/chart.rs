// =============================================================================
// Chart-level patterns — consolidation, 52-week extremes, support/resistance
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::{rolling_max, rolling_min, safe_div};
use crate::types::PriceSeries;

/// Default consolidation lookback window.
pub const CONSOLIDATION_WINDOW: usize = 20;

/// Default consolidation threshold as a fraction of the midpoint (5 %).
pub const CONSOLIDATION_THRESHOLD: f64 = 0.05;

/// Trading days in a 52-week lookback.
pub const TRADING_DAYS_52W: usize = 252;

/// "Near the 52-week high" when within this many percent below it.
pub const NEAR_HIGH_THRESHOLD_PCT: f64 = 5.0;

/// Detect consolidation: the rolling high-low range is narrow relative to
/// its midpoint.
///
/// `threshold` is a fraction (0.05 = 5 %). Warm-up entries and bars with a
/// degenerate midpoint are false.
pub fn consolidation(series: &PriceSeries, window: usize, threshold: f64) -> Result<Vec<bool>> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "consolidation threshold must be finite and > 0, got {threshold}"
        )));
    }

    let hi = rolling_max(&series.highs(), window)?;
    let lo = rolling_min(&series.lows(), window)?;

    Ok(hi
        .iter()
        .zip(lo.iter())
        .map(|(&h, &l)| {
            let midpoint = (h + l) / 2.0;
            let range_pct = safe_div(h - l, midpoint) * 100.0;
            // NaN (warm-up or zero midpoint) fails the comparison.
            range_pct < threshold * 100.0
        })
        .collect())
}

/// 52-week price statistics over the trailing `min(252, len)` bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week52Stats {
    pub high_52w: f64,
    pub low_52w: f64,
    pub current_price: f64,
    /// Percent distance of the latest close below the 52-week high (<= 0).
    pub pct_from_high: f64,
    /// Percent distance of the latest close above the 52-week low (>= 0).
    pub pct_from_low: f64,
    /// One-sided rule: `pct_from_high > -5`. Only the lower bound is
    /// checked, matching the long-standing scan behavior.
    pub near_high: bool,
}

/// Compute 52-week stats for the series.
pub fn week52_stats(series: &PriceSeries) -> Week52Stats {
    let lookback = series.len().min(TRADING_DAYS_52W);
    let tail = &series.bars()[series.len() - lookback..];

    let high_52w = tail.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low_52w = tail.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let current_price = series.last().close;

    let pct_from_high = safe_div(current_price - high_52w, high_52w) * 100.0;
    let pct_from_low = safe_div(current_price - low_52w, low_52w) * 100.0;

    Week52Stats {
        high_52w,
        low_52w,
        current_price,
        pct_from_high,
        pct_from_low,
        near_high: pct_from_high > -NEAR_HIGH_THRESHOLD_PCT,
    }
}

/// Support and resistance levels from local extrema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Ascending support levels (from local minima of lows).
    pub support: Vec<f64>,
    /// Descending resistance levels (from local maxima of highs).
    pub resistance: Vec<f64>,
}

/// Collect support/resistance levels by simple ranking of strict local
/// extrema (a point lower/higher than both neighbors).
///
/// Selection keeps the historical quirk: support takes the `num_levels`
/// lowest out of the `2 * num_levels` highest local minima, resistance the
/// `num_levels` highest out of the `2 * num_levels` lowest local maxima.
/// This is a deliberate simplification, not a clustering algorithm.
pub fn support_resistance(series: &PriceSeries, num_levels: usize) -> Result<SupportResistance> {
    if num_levels == 0 {
        return Err(Error::InvalidParameter("num_levels must be >= 1".into()));
    }

    let lows = series.lows();
    let highs = series.highs();

    let mut local_minima = Vec::new();
    let mut local_maxima = Vec::new();
    for i in 1..series.len().saturating_sub(1) {
        if lows[i - 1] > lows[i] && lows[i + 1] > lows[i] {
            local_minima.push(lows[i]);
        }
        if highs[i - 1] < highs[i] && highs[i + 1] < highs[i] {
            local_maxima.push(highs[i]);
        }
    }

    // Support: 2N largest minima, deduped, ascending, first N.
    local_minima.sort_by(|a, b| b.total_cmp(a));
    local_minima.truncate(num_levels * 2);
    local_minima.sort_by(f64::total_cmp);
    local_minima.dedup();
    local_minima.truncate(num_levels);

    // Resistance: 2N smallest maxima, deduped, descending, first N.
    local_maxima.sort_by(f64::total_cmp);
    local_maxima.truncate(num_levels * 2);
    local_maxima.sort_by(|a, b| b.total_cmp(a));
    local_maxima.dedup();
    local_maxima.truncate(num_levels);

    Ok(SupportResistance {
        support: local_minima,
        resistance: local_maxima,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::{series_from_closes, series_from_ohlc};

    #[test]
    fn consolidation_bad_threshold_rejected() {
        let series = series_from_closes(&[100.0; 25]);
        assert!(consolidation(&series, 20, 0.0).is_err());
    }

    #[test]
    fn consolidation_warmup_is_false() {
        let series = series_from_closes(&[100.0; 25]);
        let out = consolidation(&series, 20, 0.05).unwrap();
        for &flag in &out[..19] {
            assert!(!flag);
        }
    }

    #[test]
    fn tight_range_consolidates() {
        // Closes oscillate within ±0.5 around 100 — roughly a 3 % total
        // range against a midpoint of 100 with the test fixture's ±1 wicks.
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let series = series_from_closes(&closes);
        let out = consolidation(&series, 20, 0.05).unwrap();
        assert!(out[29]);
    }

    #[test]
    fn wide_range_does_not_consolidate() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + 2.0 * i as f64).collect();
        let series = series_from_closes(&closes);
        let out = consolidation(&series, 20, 0.05).unwrap();
        assert!(!out[29]);
    }

    #[test]
    fn week52_uses_trailing_252_bars() {
        // 300 bars: an early spike to 500 falls outside the trailing 252.
        let mut closes = vec![100.0; 300];
        closes[10] = 500.0;
        let series = series_from_closes(&closes);
        let stats = week52_stats(&series);
        assert!(stats.high_52w < 500.0);
    }

    #[test]
    fn week52_near_high_one_sided() {
        // Latest close within 5 % below the high.
        let mut closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        closes.push(155.0); // high so far ~159+1 wick
        let series = series_from_closes(&closes);
        let stats = week52_stats(&series);
        assert!(stats.pct_from_high <= 0.0);
        assert!(stats.near_high);
    }

    #[test]
    fn week52_far_from_high() {
        let mut closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        closes.push(100.0);
        let series = series_from_closes(&closes);
        let stats = week52_stats(&series);
        assert!(!stats.near_high);
        assert!((stats.current_price - 100.0).abs() < 1e-12);
    }

    #[test]
    fn support_resistance_finds_local_extrema() {
        // Zig-zag lows/highs with clear local extrema.
        let series = series_from_ohlc(&[
            (100.0, 105.0, 95.0, 100.0),
            (100.0, 103.0, 90.0, 95.0),  // local low at 90
            (95.0, 110.0, 94.0, 105.0),  // local high at 110
            (105.0, 108.0, 92.0, 96.0),  // local low at 92
            (96.0, 112.0, 95.0, 108.0),  // local high at 112
            (108.0, 111.0, 97.0, 100.0),
        ]);
        let sr = support_resistance(&series, 3).unwrap();
        assert!(sr.support.contains(&90.0));
        assert!(sr.support.contains(&92.0));
        assert!(sr.resistance.contains(&110.0));
        assert!(sr.resistance.contains(&112.0));
        // Support ascending, resistance descending.
        assert!(sr.support.windows(2).all(|w| w[0] <= w[1]));
        assert!(sr.resistance.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn support_resistance_zero_levels_rejected() {
        let series = series_from_closes(&[100.0; 10]);
        assert!(support_resistance(&series, 0).is_err());
    }

    #[test]
    fn support_resistance_short_series_empty() {
        let series = series_from_closes(&[100.0, 101.0]);
        let sr = support_resistance(&series, 3).unwrap();
        assert!(sr.support.is_empty());
        assert!(sr.resistance.is_empty());
    }
}
