// =============================================================================
// Volume Weighted Average Price (VWAP)
// =============================================================================
//
//   typical = (high + low + close) / 3
//   vwap    = cumsum(typical * volume) / cumsum(volume)
//
// Defined from the first bar onward; while the cumulative volume is zero the
// quotient is 0/0 and the entry is NaN.

use crate::series::{cumulative_sum, safe_div};
use crate::types::PriceSeries;

/// Compute the VWAP column for the series.
pub fn vwap(series: &PriceSeries) -> Vec<f64> {
    let tp_vol: Vec<f64> = series
        .bars()
        .iter()
        .map(|b| (b.high + b.low + b.close) / 3.0 * b.volume)
        .collect();
    let volumes = series.volumes();

    let cum_tp_vol = cumulative_sum(&tp_vol);
    let cum_vol = cumulative_sum(&volumes);

    cum_tp_vol
        .iter()
        .zip(cum_vol.iter())
        .map(|(&num, &den)| safe_div(num, den))
        .collect()
}
