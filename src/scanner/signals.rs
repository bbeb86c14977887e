// =============================================================================
// Per-ticker scan signals
// =============================================================================
//
// Each check is a pure function of one ticker's series plus thresholds.
// Data insufficiency shows up as `None` / `Neutral` / `false`, never as an
// error, so one thin ticker cannot break a batch scan.

use crate::error::Result;
use crate::indicators::{current_rsi, golden_death_cross};
use crate::patterns::{consolidation, week52_stats};
use crate::series::safe_div;
use crate::types::{ConsolidationStatus, MaCrossover, PriceSeries, RsiSignal};

/// Minimum bars for the 50/200 crossover to be meaningful.
const CROSSOVER_MIN_BARS: usize = 200;

/// Current volume divided by the mean volume of the trailing `lookback`
/// bars, excluding the current bar.
///
/// `None` when there are fewer than `lookback + 1` bars or the trailing
/// mean is zero.
pub fn relative_volume(series: &PriceSeries, lookback: usize) -> Option<f64> {
    if lookback == 0 || series.len() < lookback + 1 {
        return None;
    }

    let volumes = series.volumes();
    let trailing = &volumes[volumes.len() - 1 - lookback..volumes.len() - 1];
    let avg = trailing.iter().sum::<f64>() / lookback as f64;
    let ratio = safe_div(series.last().volume, avg);
    if ratio.is_nan() {
        None
    } else {
        Some(ratio)
    }
}

/// Classify the latest RSI value against the oversold/overbought
/// thresholds. Returns the classification together with the raw value;
/// an undefined RSI (short or flat series) is `Neutral` with no value.
pub fn rsi_signal(
    series: &PriceSeries,
    period: usize,
    oversold: f64,
    overbought: f64,
) -> Result<(RsiSignal, Option<f64>)> {
    let value = current_rsi(&series.closes(), period)?;
    let signal = match value {
        Some(v) if v < oversold => RsiSignal::Oversold,
        Some(v) if v > overbought => RsiSignal::Overbought,
        _ => RsiSignal::Neutral,
    };
    Ok((signal, value))
}

/// Inspect the most recent `lookback` bars for a 50/200 SMA cross.
///
/// With fewer than 200 bars the answer is always `None`. When both flags
/// appear inside the window the golden cross wins — a deliberate tie-break.
pub fn ma_crossover_signal(series: &PriceSeries, lookback: usize) -> Result<MaCrossover> {
    if series.len() < CROSSOVER_MIN_BARS {
        return Ok(MaCrossover::None);
    }

    let gd = golden_death_cross(&series.closes())?;
    let start = gd.golden.len().saturating_sub(lookback);

    if gd.golden[start..].iter().any(|&g| g) {
        Ok(MaCrossover::GoldenCross)
    } else if gd.death[start..].iter().any(|&d| d) {
        Ok(MaCrossover::DeathCross)
    } else {
        Ok(MaCrossover::None)
    }
}

/// One-sided proximity check: the latest close sits within `threshold_pct`
/// percent below the 52-week high.
pub fn near_52w_high(series: &PriceSeries, threshold_pct: f64) -> bool {
    week52_stats(series).pct_from_high > -threshold_pct
}

/// Consolidation state plus the breakout rule: the ticker was consolidating
/// somewhere in bars [-10, -2] but is not at the latest bar, and the close
/// rose more than 2 % against the close four bars back.
pub fn consolidation_breakout(
    series: &PriceSeries,
    window: usize,
    threshold: f64,
) -> Result<ConsolidationStatus> {
    let flags = consolidation(series, window, threshold)?;
    let n = flags.len();
    if n < 2 {
        return Ok(ConsolidationStatus::default());
    }

    let in_consolidation = flags[n - 1];
    let was_consolidating = if n > 10 {
        flags[n - 10..n - 1].iter().any(|&f| f)
    } else {
        false
    };

    let mut breaking_out = was_consolidating && !in_consolidation;
    if breaking_out && series.len() > 5 {
        let closes = series.closes();
        let base = closes[closes.len() - 5];
        let change = safe_div(closes[closes.len() - 1] - base, base) * 100.0;
        breaking_out = change > 2.0;
    }

    Ok(ConsolidationStatus {
        in_consolidation,
        breaking_out,
    })
}

/// Percent change of the latest close against the close `bars` bars ago.
/// `None` with insufficient history or a degenerate base price.
pub fn trailing_change(series: &PriceSeries, bars: usize) -> Option<f64> {
    let closes = series.closes();
    if bars == 0 || closes.len() <= bars {
        return None;
    }
    let base = closes[closes.len() - 1 - bars];
    let change = safe_div(closes[closes.len() - 1] - base, base) * 100.0;
    if change.is_nan() {
        None
    } else {
        Some(change)
    }
}

/// Composite breakout score: +3 breaking out, +2 near the 52-week high,
/// +2 volume surge, +2 golden cross. Higher is a stronger signal.
pub fn breakout_score(
    consolidation: ConsolidationStatus,
    near_high: bool,
    volume_surge: bool,
    crossover: MaCrossover,
) -> i32 {
    let mut score = 0;
    if consolidation.breaking_out {
        score += 3;
    }
    if near_high {
        score += 2;
    }
    if volume_surge {
        score += 2;
    }
    if crossover == MaCrossover::GoldenCross {
        score += 2;
    }
    score
}
