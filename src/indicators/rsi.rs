// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes; the first
//          bar has no predecessor and contributes zero gain and zero loss.
// Step 2 — Split deltas into gains (up moves) and losses (down moves).
// Step 3 — avg_gain / avg_loss = simple rolling mean over `period`.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

use crate::error::Result;
use crate::series::{rolling_mean, safe_div};

/// Compute the RSI series for the given closes, aligned with the input.
///
/// Entries at indices `< period - 1` are NaN (rolling warm-up).
///
/// # Edge cases
/// - `period == 0` => `InvalidParameter`
/// - avg_loss == 0 with avg_gain > 0: RS diverges; RSI is clamped to 100
///   (maximally overbought) instead of leaking an infinity.
/// - avg_loss == 0 with avg_gain == 0 (flat window): no gain/loss signal
///   exists, so the entry is NaN rather than an arbitrary midpoint.
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<f64>> {
    let n = closes.len();

    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        let (g, l) = (avg_gain[i], avg_loss[i]);
        if g.is_nan() || l.is_nan() {
            continue;
        }
        let rs = safe_div(g, l);
        out[i] = if rs.is_nan() {
            if l == 0.0 && g > 0.0 {
                100.0
            } else {
                f64::NAN
            }
        } else {
            100.0 - 100.0 / (1.0 + rs)
        };
    }
    Ok(out)
}

/// Most recent RSI value, or `None` when it is undefined (short series or
/// flat window).
pub fn current_rsi(closes: &[f64], period: usize) -> Result<Option<f64>> {
    let series = rsi(closes, period)?;
    Ok(series.last().copied().filter(|v| !v.is_nan()))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_period_zero_rejected() {
        assert!(rsi(&[1.0, 2.0, 3.0], 0).is_err());
    }

    #[test]
    fn rsi_warmup_prefix_undefined() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let out = rsi(&closes, 14).unwrap();
        assert_eq!(out.len(), 30);
        for v in &out[..13] {
            assert!(v.is_nan());
        }
        for v in &out[13..] {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn rsi_all_gains_is_100() {
        // Strictly ascending prices => no losses => RSI clamped to 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let out = rsi(&closes, 14).unwrap();
        for v in out.iter().filter(|v| !v.is_nan()) {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let out = rsi(&closes, 14).unwrap();
        for v in out.iter().filter(|v| !v.is_nan()) {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_undefined() {
        // No price change at all => neither gain nor loss => undefined.
        let closes = vec![100.0; 30];
        let out = rsi(&closes, 14).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_range_check() {
        // Arbitrary data — RSI must always be in [0, 100] wherever defined.
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let out = rsi(&closes, 14).unwrap();
        for v in out.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_rising_prices_overbought_within_15_bars() {
        // Strictly increasing prices over >= 15 bars drive RSI above 70.
        let closes: Vec<f64> = (0..15).map(|x| 100.0 + x as f64).collect();
        let out = rsi(&closes, 14).unwrap();
        let last = out[14];
        assert!(last > 70.0, "expected overbought, got {last}");
    }

    #[test]
    fn current_rsi_none_on_short_series() {
        assert!(current_rsi(&[1.0, 2.0], 14).unwrap().is_none());
    }

    #[test]
    fn current_rsi_some_on_defined_series() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let v = current_rsi(&closes, 14).unwrap().unwrap();
        assert!((v - 100.0).abs() < 1e-10);
    }
}
