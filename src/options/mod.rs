// =============================================================================
// Options Pricing Module
// =============================================================================
//
// Self-contained Black-Scholes pricing and chain-row utilities. Independent
// of the indicator/scan pipeline — consumes only scalar inputs.

pub mod chains;
pub mod greeks;

pub use chains::{
    chain_summary, filter_by_moneyness, liquid_rows, spread_stats, ChainRow, ChainSummary,
    SpreadStats,
};
pub use greeks::{
    black_scholes_price, compute_greeks, greeks_for_quote, time_to_expiry, GreeksResult,
    OptionQuote, OptionType, MIN_TIME_TO_EXPIRY,
};
