// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// Running signed accumulation of volume, seeded with the first bar's volume:
//   close rose  => obv += volume
//   close fell  => obv -= volume
//   unchanged   => obv unchanged

use crate::types::PriceSeries;

/// Compute the OBV column for the series. Fully defined — no warm-up region.
pub fn obv(series: &PriceSeries) -> Vec<f64> {
    let bars = series.bars();
    let mut out = Vec::with_capacity(bars.len());
    let mut acc = bars[0].volume;
    out.push(acc);

    for i in 1..bars.len() {
        if bars[i].close > bars[i - 1].close {
            acc += bars[i].volume;
        } else if bars[i].close < bars[i - 1].close {
            acc -= bars[i].volume;
        }
        out.push(acc);
    }
    out
}
