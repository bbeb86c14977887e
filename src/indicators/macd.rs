// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd      = EMA(close, fast) - EMA(close, slow)
//   signal    = EMA(macd, signal_span)
//   histogram = macd - signal
//
// Because the exponential mean is seeded by its first input there is no
// warm-up NaN region: every index of all three columns is defined.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::series::exponential_mean;

/// The three aligned MACD columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD columns for the given closes. Standard parameters are
/// (12, 26, 9).
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> Result<MacdSeries> {
    let ema_fast = exponential_mean(closes, fast)?;
    let ema_slow = exponential_mean(closes, slow)?;

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal = exponential_mean(&macd, signal_span)?;

    let histogram: Vec<f64> = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdSeries {
        macd,
        signal,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_zero_span_rejected() {
        assert!(macd(&[1.0, 2.0], 0, 26, 9).is_err());
        assert!(macd(&[1.0, 2.0], 12, 0, 9).is_err());
        assert!(macd(&[1.0, 2.0], 12, 26, 0).is_err());
    }

    #[test]
    fn macd_columns_fully_defined() {
        let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        let m = macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(m.macd.len(), 40);
        assert!(m.macd.iter().all(|v| v.is_finite()));
        assert!(m.signal.iter().all(|v| v.is_finite()));
        assert!(m.histogram.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn histogram_is_macd_minus_signal_everywhere() {
        let closes = vec![
            10.0, 10.5, 10.2, 11.0, 11.4, 11.1, 12.0, 12.6, 12.2, 13.0, 12.4,
            11.8, 12.9, 13.5, 14.1, 13.7, 14.4,
        ];
        let m = macd(&closes, 12, 26, 9).unwrap();
        for i in 0..closes.len() {
            let diff = m.macd[i] - m.signal[i];
            assert!(
                (m.histogram[i] - diff).abs() < 1e-12,
                "index {i}: {} vs {diff}",
                m.histogram[i]
            );
        }
    }

    #[test]
    fn macd_first_index_is_zero() {
        // Both EMAs are seeded with the first close, so macd[0] == 0.
        let closes = vec![100.0, 101.0, 102.0];
        let m = macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(m.macd[0], 0.0);
        assert_eq!(m.signal[0], 0.0);
    }

    #[test]
    fn rising_prices_positive_macd() {
        // The fast EMA tracks a rising series more closely than the slow one.
        let closes: Vec<f64> = (0..60).map(|x| 100.0 + x as f64).collect();
        let m = macd(&closes, 12, 26, 9).unwrap();
        assert!(*m.macd.last().unwrap() > 0.0);
    }
}
