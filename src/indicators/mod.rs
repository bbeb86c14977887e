// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator computations over price series. Outputs
// are aligned with the input (NaN marks warm-up/degenerate entries) so that
// partial frames can still be assembled for short series.

pub mod bollinger;
pub mod crossover;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod vwap;

pub use bollinger::{bollinger, BollingerSeries};
pub use crossover::{crossovers, golden_death_cross, Crossover, GoldenDeathCross};
pub use macd::{macd, MacdSeries};
pub use obv::obv;
pub use rsi::{current_rsi, rsi};
pub use vwap::vwap;
