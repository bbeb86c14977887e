// =============================================================================
// Series math primitives — rolling and exponential statistics
// =============================================================================
//
// All functions are pure, deterministic, and aligned: the output vector has
// the same length as the input, with `f64::NAN` marking entries that are
// undefined (warm-up prefix of a rolling window, degenerate division).
//
// A zero window or span is a caller bug and fails fast with
// `Error::InvalidParameter`; a series shorter than the window is *not* an
// error — the whole output is simply NaN.

use crate::error::{Error, Result};

/// Divide, mapping division by zero (and NaN operands) to NaN.
///
/// This is the single degenerate-math policy shared by RSI, VWAP, and the
/// consolidation midpoint — callers never special-case zero denominators
/// themselves.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 || den.is_nan() || num.is_nan() {
        f64::NAN
    } else {
        num / den
    }
}

/// Arithmetic mean over the trailing `window` samples ending at each index.
///
/// Entries at indices `< window - 1` are NaN (insufficient samples).
/// Computed incrementally with a running sum, O(n).
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidParameter("window must be >= 1".into()));
    }

    let mut out = vec![f64::NAN; values.len()];
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out[i] = sum / window as f64;
        }
    }
    Ok(out)
}

/// Sample standard deviation (n − 1 divisor) over the trailing `window`
/// samples, same NaN-prefix rule as `rolling_mean`.
///
/// A window of 1 yields NaN everywhere: a single sample has no sample
/// deviation (0 / 0).
///
/// Recomputes each window directly rather than maintaining running moments;
/// O(n * window), numerically robust against cancellation.
pub fn rolling_std(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidParameter("window must be >= 1".into()));
    }

    let mut out = vec![f64::NAN; values.len()];
    if window == 1 {
        return Ok(out);
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let ss: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
        out[i] = (ss / (window as f64 - 1.0)).sqrt();
    }
    Ok(out)
}

/// Rolling maximum over the trailing `window` samples, NaN-prefix rule as
/// `rolling_mean`.
pub fn rolling_max(values: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_extreme(values, window, f64::max)
}

/// Rolling minimum over the trailing `window` samples, NaN-prefix rule as
/// `rolling_mean`.
pub fn rolling_min(values: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_extreme(values, window, f64::min)
}

fn rolling_extreme(values: &[f64], window: usize, pick: fn(f64, f64) -> f64) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidParameter("window must be >= 1".into()));
    }

    let mut out = vec![f64::NAN; values.len()];
    for i in (window.saturating_sub(1))..values.len() {
        let slice = &values[i + 1 - window..=i];
        out[i] = slice.iter().copied().fold(slice[0], pick);
    }
    Ok(out)
}

/// Exponentially weighted mean with smoothing factor `k = 2 / (span + 1)`,
/// seeded by the first value. Unlike the rolling primitives there is no
/// warm-up NaN region: every index is defined.
///
/// The recurrence is exactly `ema[0] = values[0]`,
/// `ema[i] = values[i] * k + ema[i-1] * (1 - k)` — bit-reproducible.
pub fn exponential_mean(values: &[f64], span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(Error::InvalidParameter("span must be >= 1".into()));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    out.push(values[0]);
    for i in 1..values.len() {
        let prev = out[i - 1];
        out.push(values[i] * k + prev * (1.0 - k));
    }
    Ok(out)
}

/// Running sum: `out[i] = values[0] + ... + values[i]`.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for &v in values {
        sum += v;
        out.push(sum);
    }
    out
}

/// Percentage change from `periods` samples back:
/// `(v[i] - v[i-p]) / v[i-p] * 100`. The first `periods` entries are NaN,
/// as is any entry whose base value is zero.
pub fn percent_change(values: &[f64], periods: usize) -> Result<Vec<f64>> {
    if periods == 0 {
        return Err(Error::InvalidParameter("periods must be >= 1".into()));
    }

    let mut out = vec![f64::NAN; values.len()];
    for i in periods..values.len() {
        let base = values[i - periods];
        out[i] = safe_div(values[i] - base, base) * 100.0;
    }
    Ok(out)
}
