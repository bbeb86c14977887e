// =============================================================================
// Pattern Recognition Module
// =============================================================================
//
// Candlestick classifiers and chart-level detectors. Like the indicator
// engine, every function is a pure function of the series it is handed —
// no state survives between invocations.

pub mod candlestick;
pub mod chart;

pub use candlestick::{
    doji, engulfing, hammer, shooting_star, EngulfingSeries, DOJI_THRESHOLD_PCT, SHADOW_RATIO,
};
pub use chart::{
    consolidation, support_resistance, week52_stats, SupportResistance, Week52Stats,
    CONSOLIDATION_THRESHOLD, CONSOLIDATION_WINDOW, NEAR_HIGH_THRESHOLD_PCT, TRADING_DAYS_52W,
};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PriceSeries;

/// How many trailing bars the pattern summary inspects.
const SUMMARY_LOOKBACK: usize = 30;

/// Counts and levels summarizing recent pattern activity for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    pub doji_count: usize,
    pub bullish_engulfing_count: usize,
    pub bearish_engulfing_count: usize,
    pub hammer_count: usize,
    pub shooting_star_count: usize,
    pub in_consolidation: bool,
    pub consolidation_days: usize,
    pub levels: SupportResistance,
    pub week52: Week52Stats,
}

fn count_tail(flags: &[bool], lookback: usize) -> usize {
    let start = flags.len().saturating_sub(lookback);
    flags[start..].iter().filter(|&&f| f).count()
}

/// Summarize pattern activity over the trailing 30 bars of the series.
pub fn pattern_summary(series: &PriceSeries) -> Result<PatternSummary> {
    let doji_flags = doji(series, DOJI_THRESHOLD_PCT)?;
    let engulf = engulfing(series);
    let hammer_flags = hammer(series, SHADOW_RATIO)?;
    let star_flags = shooting_star(series, SHADOW_RATIO)?;
    let consol = consolidation(series, CONSOLIDATION_WINDOW, CONSOLIDATION_THRESHOLD)?;

    Ok(PatternSummary {
        doji_count: count_tail(&doji_flags, SUMMARY_LOOKBACK),
        bullish_engulfing_count: count_tail(&engulf.bullish, SUMMARY_LOOKBACK),
        bearish_engulfing_count: count_tail(&engulf.bearish, SUMMARY_LOOKBACK),
        hammer_count: count_tail(&hammer_flags, SUMMARY_LOOKBACK),
        shooting_star_count: count_tail(&star_flags, SUMMARY_LOOKBACK),
        in_consolidation: consol.last().copied().unwrap_or(false),
        consolidation_days: count_tail(&consol, SUMMARY_LOOKBACK),
        levels: support_resistance(series, 3)?,
        week52: week52_stats(series),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::series_from_closes;

    #[test]
    fn summary_on_quiet_series() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + if i % 2 == 0 { 0.3 } else { -0.3 })
            .collect();
        let series = series_from_closes(&closes);
        let summary = pattern_summary(&series).unwrap();

        // A tight oscillation consolidates and never engulfs.
        assert!(summary.in_consolidation);
        assert!(summary.consolidation_days > 0);
        assert_eq!(summary.week52.current_price, *closes.last().unwrap());
    }

    #[test]
    fn summary_counts_are_bounded_by_lookback() {
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + (i % 7) as f64).collect();
        let series = series_from_closes(&closes);
        let summary = pattern_summary(&series).unwrap();
        assert!(summary.doji_count <= 30);
        assert!(summary.consolidation_days <= 30);
    }
}
