// =============================================================================
// Indicator and pattern frames — aligned derived columns over a price series
// =============================================================================
//
// A frame owns a clone of the input series plus named derived columns, every
// column exactly series length. Computations are pure: calling the builders
// twice on the same series yields identical frames.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indicators::{bollinger, golden_death_cross, macd, obv, rsi, vwap};
use crate::patterns::{
    consolidation, doji, engulfing, hammer, shooting_star, CONSOLIDATION_THRESHOLD,
    CONSOLIDATION_WINDOW, DOJI_THRESHOLD_PCT, SHADOW_RATIO,
};
use crate::series::{exponential_mean, rolling_mean};
use crate::types::PriceSeries;

/// Default RSI lookback.
pub const RSI_PERIOD: usize = 14;

/// Default MACD parameters.
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Default Bollinger parameters.
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_K: f64 = 2.0;

/// A price series plus named numeric columns aligned by position. Warm-up
/// entries are NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFrame {
    series: PriceSeries,
    columns: Vec<(String, Vec<f64>)>,
}

impl IndicatorFrame {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            series,
            columns: Vec::new(),
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// Add a column. Replaces any existing column of the same name; the
    /// column must be aligned with the series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.series.len() {
            return Err(Error::InvalidParameter(format!(
                "column '{name}' has {} entries, series has {}",
                values.len(),
                self.series.len()
            )));
        }
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = values;
        } else {
            self.columns.push((name, values));
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Column names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// A price series plus named boolean pattern columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternFrame {
    series: PriceSeries,
    columns: Vec<(String, Vec<bool>)>,
}

impl PatternFrame {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            series,
            columns: Vec::new(),
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<bool>) -> Result<()> {
        let name = name.into();
        if values.len() != self.series.len() {
            return Err(Error::InvalidParameter(format!(
                "column '{name}' has {} entries, series has {}",
                values.len(),
                self.series.len()
            )));
        }
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = values;
        } else {
            self.columns.push((name, values));
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[bool]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// Build the standard indicator frame: moving averages, RSI, MACD,
/// Bollinger Bands, VWAP, OBV, and golden/death cross flags (as 0/1
/// columns so the frame stays numeric).
pub fn add_indicators(series: &PriceSeries) -> Result<IndicatorFrame> {
    let closes = series.closes();
    let mut frame = IndicatorFrame::new(series.clone());

    frame.insert("sma_20", rolling_mean(&closes, 20)?)?;
    frame.insert("sma_50", rolling_mean(&closes, 50)?)?;
    frame.insert("sma_200", rolling_mean(&closes, 200)?)?;
    frame.insert("ema_12", exponential_mean(&closes, MACD_FAST)?)?;
    frame.insert("ema_26", exponential_mean(&closes, MACD_SLOW)?)?;

    frame.insert("rsi", rsi(&closes, RSI_PERIOD)?)?;

    let m = macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?;
    frame.insert("macd", m.macd)?;
    frame.insert("macd_signal", m.signal)?;
    frame.insert("macd_histogram", m.histogram)?;

    let bb = bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_K)?;
    frame.insert("bb_upper", bb.upper)?;
    frame.insert("bb_middle", bb.middle)?;
    frame.insert("bb_lower", bb.lower)?;

    frame.insert("vwap", vwap(series))?;
    frame.insert("obv", obv(series))?;

    let gd = golden_death_cross(&closes)?;
    frame.insert(
        "golden_cross",
        gd.golden.iter().map(|&g| if g { 1.0 } else { 0.0 }).collect(),
    )?;
    frame.insert(
        "death_cross",
        gd.death.iter().map(|&d| if d { 1.0 } else { 0.0 }).collect(),
    )?;

    Ok(frame)
}

/// Build the standard pattern frame: candlestick classifiers plus the
/// consolidation flag.
pub fn add_patterns(series: &PriceSeries) -> Result<PatternFrame> {
    let mut frame = PatternFrame::new(series.clone());

    frame.insert("doji", doji(series, DOJI_THRESHOLD_PCT)?)?;
    let e = engulfing(series);
    frame.insert("bullish_engulfing", e.bullish)?;
    frame.insert("bearish_engulfing", e.bearish)?;
    frame.insert("hammer", hammer(series, SHADOW_RATIO)?)?;
    frame.insert("shooting_star", shooting_star(series, SHADOW_RATIO)?)?;
    frame.insert(
        "consolidation",
        consolidation(series, CONSOLIDATION_WINDOW, CONSOLIDATION_THRESHOLD)?,
    )?;

    Ok(frame)
}
