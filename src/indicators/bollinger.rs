// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the rolling sample standard
// deviation over the same window.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::{rolling_mean, rolling_std};

/// The three aligned Bollinger columns. Entries share the rolling warm-up
/// NaN prefix of the underlying window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Compute Bollinger Bands for the given closes. Standard parameters are
/// period = 20, k = 2.0.
pub fn bollinger(closes: &[f64], period: usize, k: f64) -> Result<BollingerSeries> {
    if !k.is_finite() || k <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "bollinger multiplier must be finite and > 0, got {k}"
        )));
    }

    let middle = rolling_mean(closes, period)?;
    let std = rolling_std(closes, period)?;

    let upper: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m + k * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m - k * s)
        .collect();

    Ok(BollingerSeries {
        upper,
        middle,
        lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_bad_multiplier_rejected() {
        assert!(bollinger(&[1.0; 30], 20, 0.0).is_err());
        assert!(bollinger(&[1.0; 30], 20, -2.0).is_err());
        assert!(bollinger(&[1.0; 30], 20, f64::NAN).is_err());
    }

    #[test]
    fn bollinger_zero_period_rejected() {
        assert!(bollinger(&[1.0; 30], 0, 2.0).is_err());
    }

    #[test]
    fn band_ordering_holds_wherever_defined() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let bb = bollinger(&closes, 20, 2.0).unwrap();
        for i in 0..closes.len() {
            if bb.middle[i].is_nan() {
                assert!(bb.upper[i].is_nan() && bb.lower[i].is_nan());
                continue;
            }
            assert!(bb.upper[i] >= bb.middle[i], "index {i}");
            assert!(bb.middle[i] >= bb.lower[i], "index {i}");
        }
    }

    #[test]
    fn larger_multiplier_strictly_widens() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let narrow = bollinger(&closes, 20, 2.0).unwrap();
        let wide = bollinger(&closes, 20, 3.0).unwrap();
        for i in 19..closes.len() {
            // std > 0 for this oscillating input, so widening is strict.
            assert!(wide.upper[i] > narrow.upper[i], "index {i}");
            assert!(wide.lower[i] < narrow.lower[i], "index {i}");
        }
    }

    #[test]
    fn flat_series_bands_collapse() {
        let bb = bollinger(&[100.0; 25], 20, 2.0).unwrap();
        let i = 24;
        assert!((bb.upper[i] - 100.0).abs() < 1e-12);
        assert!((bb.lower[i] - 100.0).abs() < 1e-12);
    }
}
