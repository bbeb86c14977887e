// =============================================================================
// Crossover detection — generic series crossings and the 50/200 SMA cross
// =============================================================================
//
// At index i, series A crosses series B:
//   bullish if A[i] > B[i] and A[i-1] <= B[i-1]
//   bearish if A[i] < B[i] and A[i-1] >= B[i-1]
//
// Index 0 has no predecessor and is always None. NaN operands fail every
// comparison, so warm-up regions of rolling inputs can never signal.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::rolling_mean;

/// Direction of a crossing at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    Bullish,
    Bearish,
    None,
}

/// Detect crossings of `a` over `b` at every index. The two series must be
/// aligned (equal length).
pub fn crossovers(a: &[f64], b: &[f64]) -> Result<Vec<Crossover>> {
    if a.len() != b.len() {
        return Err(Error::InvalidParameter(format!(
            "crossover inputs must be aligned: {} vs {} samples",
            a.len(),
            b.len()
        )));
    }

    let mut out = vec![Crossover::None; a.len()];
    for i in 1..a.len() {
        if a[i] > b[i] && a[i - 1] <= b[i - 1] {
            out[i] = Crossover::Bullish;
        } else if a[i] < b[i] && a[i - 1] >= b[i - 1] {
            out[i] = Crossover::Bearish;
        }
    }
    Ok(out)
}

/// Aligned golden/death cross flags from the 50 vs 200 SMA crossing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenDeathCross {
    pub golden: Vec<bool>,
    pub death: Vec<bool>,
}

/// SMA windows for the golden/death cross.
pub const GOLDEN_FAST: usize = 50;
pub const GOLDEN_SLOW: usize = 200;

/// Detect golden (50 SMA crossing above 200 SMA) and death (crossing below)
/// flags for the given closes.
///
/// With fewer than 200 samples the slow SMA never leaves its warm-up region,
/// so every flag is false.
pub fn golden_death_cross(closes: &[f64]) -> Result<GoldenDeathCross> {
    let fast = rolling_mean(closes, GOLDEN_FAST)?;
    let slow = rolling_mean(closes, GOLDEN_SLOW)?;
    let crosses = crossovers(&fast, &slow)?;

    Ok(GoldenDeathCross {
        golden: crosses.iter().map(|c| *c == Crossover::Bullish).collect(),
        death: crosses.iter().map(|c| *c == Crossover::Bearish).collect(),
    })
}
