// =============================================================================
// Scan Aggregator
// =============================================================================
//
// Per-ticker signal extraction plus the multi-ticker batch pipeline. Each
// ticker's work is independent and order-insensitive; the batch layer owns
// concurrency, partial-failure tolerance, and deterministic ordering.

pub mod scan;
pub mod signals;

pub use scan::{
    build_record, find_breakout_candidates, find_golden_cross, find_high_volume_movers,
    find_oversold, scan_ticker, scan_tickers, ScanFilters,
};
pub use signals::{
    breakout_score, consolidation_breakout, ma_crossover_signal, near_52w_high, relative_volume,
    rsi_signal, trailing_change,
};
