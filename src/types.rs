// =============================================================================
// Shared types used across the Meridian analytics engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single OHLCV bar for one trading interval.
///
/// Bars are assumed sane (high >= max(open, close), low <= min(open, close),
/// all >= 0) from the data source; none of the downstream math enforces this,
/// and violations degrade silently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// An ordered, non-empty sequence of bars for one ticker, ascending by
/// timestamp. Immutable for the duration of a computation pass: indicator
/// and pattern computations never mutate the series, they produce parallel
/// aligned columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from bars. Rejects an empty vector — every computation
    /// in the crate assumes at least one bar.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(Error::InsufficientData { needed: 1, got: 0 });
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Most recent bar. The series is never empty, so this always exists.
    pub fn last(&self) -> &PriceBar {
        self.bars.last().expect("series is non-empty by construction")
    }

    // ── Aligned column views ─────────────────────────────────────────────

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

// =============================================================================
// Scan signal enums
// =============================================================================

/// RSI classification against the oversold/overbought thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Oversold,
    Overbought,
    Neutral,
}

impl Default for RsiSignal {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversold => write!(f, "oversold"),
            Self::Overbought => write!(f, "overbought"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Recent 50/200 SMA crossover classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaCrossover {
    GoldenCross,
    DeathCross,
    None,
}

impl Default for MaCrossover {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for MaCrossover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoldenCross => write!(f, "golden_cross"),
            Self::DeathCross => write!(f, "death_cross"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Consolidation state of a ticker at scan time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationStatus {
    pub in_consolidation: bool,
    pub breaking_out: bool,
}

// =============================================================================
// ScanRecord
// =============================================================================

/// One row of a multi-ticker scan. Created fresh per scan invocation, never
/// persisted. Nullable metrics are `None` when the series was too short or
/// the computation degenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ticker: String,
    pub current_price: f64,
    pub relative_volume: Option<f64>,
    pub volume_surge: bool,
    pub rsi_signal: RsiSignal,
    pub rsi_value: Option<f64>,
    pub ma_crossover: MaCrossover,
    pub near_52w_high: bool,
    pub consolidation: ConsolidationStatus,
    pub price_change_5d: Option<f64>,
    pub price_change_20d: Option<f64>,
    pub breakout_score: i32,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_rejected() {
        let err = PriceSeries::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { needed: 1, got: 0 }));
    }

    #[test]
    fn column_views_are_aligned() {
        let series = test_support::series_from_closes(&[100.0, 101.0, 99.0]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 99.0]);
        assert_eq!(series.opens().len(), 3);
        assert_eq!(series.last().close, 99.0);
    }

    #[test]
    fn signal_enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&MaCrossover::GoldenCross).unwrap(),
            "\"golden_cross\""
        );
        assert_eq!(
            serde_json::to_string(&RsiSignal::Oversold).unwrap(),
            "\"oversold\""
        );
        assert_eq!(serde_json::to_string(&MaCrossover::None).unwrap(), "\"none\"");
    }

    #[test]
    fn signal_enums_display() {
        assert_eq!(MaCrossover::DeathCross.to_string(), "death_cross");
        assert_eq!(RsiSignal::Overbought.to_string(), "overbought");
    }
}
