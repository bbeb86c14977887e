// =============================================================================
// Option chain utilities — filtering and summary stats over fetched rows
// =============================================================================
//
// Chain retrieval itself lives with the data collaborator; these helpers are
// pure functions over rows the caller already holds.

use serde::{Deserialize, Serialize};

use crate::series::safe_div;

/// One row of an option chain as returned by the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRow {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
    pub last_price: f64,
    pub volume: u64,
    pub open_interest: u64,
    pub implied_vol: f64,
}

/// Keep rows whose strike lies within ±`moneyness_range` (a fraction, 0.10 =
/// 10 %) of the current price.
pub fn filter_by_moneyness(rows: &[ChainRow], current_price: f64, moneyness_range: f64) -> Vec<ChainRow> {
    let lower = current_price * (1.0 - moneyness_range);
    let upper = current_price * (1.0 + moneyness_range);
    rows.iter()
        .filter(|r| r.strike >= lower && r.strike <= upper)
        .cloned()
        .collect()
}

/// Keep rows liquid enough to trade: volume and open interest above the
/// given floors.
pub fn liquid_rows(rows: &[ChainRow], min_volume: u64, min_open_interest: u64) -> Vec<ChainRow> {
    rows.iter()
        .filter(|r| r.volume >= min_volume && r.open_interest >= min_open_interest)
        .cloned()
        .collect()
}

/// Bid/ask spread of one row, absolute and as a percentage of the bid
/// (NaN when the bid is zero).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadStats {
    pub spread: f64,
    pub spread_pct: f64,
}

pub fn spread_stats(row: &ChainRow) -> SpreadStats {
    let spread = row.ask - row.bid;
    SpreadStats {
        spread,
        spread_pct: safe_div(spread, row.bid) * 100.0,
    }
}

/// Volume/open-interest summary over the call and put sides of one
/// expiration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    pub total_call_volume: u64,
    pub total_put_volume: u64,
    /// `None` when no calls traded (the ratio is undefined).
    pub put_call_ratio: Option<f64>,
    pub num_call_strikes: usize,
    pub num_put_strikes: usize,
    /// Strike carrying the highest call open interest.
    pub max_call_oi_strike: Option<f64>,
    /// Strike carrying the highest put open interest.
    pub max_put_oi_strike: Option<f64>,
}

pub fn chain_summary(calls: &[ChainRow], puts: &[ChainRow]) -> ChainSummary {
    let total_call_volume: u64 = calls.iter().map(|r| r.volume).sum();
    let total_put_volume: u64 = puts.iter().map(|r| r.volume).sum();

    let put_call_ratio = if total_call_volume > 0 {
        Some(total_put_volume as f64 / total_call_volume as f64)
    } else {
        None
    };

    let max_oi_strike = |rows: &[ChainRow]| {
        rows.iter()
            .max_by_key(|r| r.open_interest)
            .map(|r| r.strike)
    };

    ChainSummary {
        total_call_volume,
        total_put_volume,
        put_call_ratio,
        num_call_strikes: calls.len(),
        num_put_strikes: puts.len(),
        max_call_oi_strike: max_oi_strike(calls),
        max_put_oi_strike: max_oi_strike(puts),
    }
}
