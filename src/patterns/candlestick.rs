// =============================================================================
// Candlestick patterns — doji, engulfing, hammer, shooting star
// =============================================================================
//
// Each classifier returns a boolean column aligned with the series. Bars
// whose inputs are degenerate (zero range, missing predecessor) classify as
// false rather than propagating NaN into boolean logic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::PriceSeries;

/// Default doji threshold: body under 0.1 % of the candle range.
pub const DOJI_THRESHOLD_PCT: f64 = 0.1;

/// Default shadow-to-body ratio for hammer / shooting star.
pub const SHADOW_RATIO: f64 = 2.0;

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

/// Doji: open and close nearly equal, signalling indecision.
///
/// A bar is a doji when body / range * 100 < `threshold_pct`. A zero-range
/// bar (high == low) is classified as not-doji — the ratio is undefined and
/// a flat bar carries no body-vs-range information.
pub fn doji(series: &PriceSeries, threshold_pct: f64) -> Result<Vec<bool>> {
    check_positive("doji threshold", threshold_pct)?;

    Ok(series
        .bars()
        .iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let range = b.high - b.low;
            if range == 0.0 {
                return false;
            }
            body / range * 100.0 < threshold_pct
        })
        .collect())
}

/// Aligned bullish/bearish engulfing flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngulfingSeries {
    pub bullish: Vec<bool>,
    pub bearish: Vec<bool>,
}

/// Bullish engulfing: a bullish candle whose body fully contains the
/// previous bearish candle's body; bearish engulfing is the mirror. The
/// first bar has no predecessor and is false in both columns.
pub fn engulfing(series: &PriceSeries) -> EngulfingSeries {
    let bars = series.bars();
    let mut bullish = vec![false; bars.len()];
    let mut bearish = vec![false; bars.len()];

    for i in 1..bars.len() {
        let prev = &bars[i - 1];
        let curr = &bars[i];

        bullish[i] = prev.close < prev.open   // previous candle bearish
            && curr.close > curr.open         // current candle bullish
            && curr.open < prev.close         // opens below previous close
            && curr.close > prev.open;        // closes above previous open

        bearish[i] = prev.close > prev.open
            && curr.close < curr.open
            && curr.open > prev.close
            && curr.close < prev.open;
    }

    EngulfingSeries { bullish, bearish }
}

/// Hammer: small body near the top with a long lower shadow.
///
/// Requires lower_shadow > ratio * body, upper_shadow < body, and
/// body < 0.3 * range.
pub fn hammer(series: &PriceSeries, ratio: f64) -> Result<Vec<bool>> {
    check_positive("hammer ratio", ratio)?;

    Ok(series
        .bars()
        .iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let lower_shadow = b.open.min(b.close) - b.low;
            let upper_shadow = b.high - b.open.max(b.close);
            let range = b.high - b.low;

            lower_shadow > ratio * body && upper_shadow < body && body < 0.3 * range
        })
        .collect())
}

/// Shooting star: small body near the bottom with a long upper shadow —
/// the mirror of the hammer.
pub fn shooting_star(series: &PriceSeries, ratio: f64) -> Result<Vec<bool>> {
    check_positive("shooting star ratio", ratio)?;

    Ok(series
        .bars()
        .iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let lower_shadow = b.open.min(b.close) - b.low;
            let upper_shadow = b.high - b.open.max(b.close);
            let range = b.high - b.low;

            upper_shadow > ratio * body && lower_shadow < body && body < 0.3 * range
        })
        .collect())
}
