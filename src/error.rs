// =============================================================================
// Error taxonomy for the Meridian analytics engine
// =============================================================================
//
// Two propagation regimes coexist:
//   - Caller bugs (zero windows, malformed input) fail fast with
//     `InvalidParameter` / `InsufficientData`.
//   - Data insufficiency *inside* a computation is represented as NaN entries
//     in the output series, never as an error, so a partial indicator frame
//     can still be produced for a short series.
//
// Batch scans catch fetch errors per ticker, log them, and omit the ticker.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A window, span, threshold, or ratio argument was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A series was too short for the requested construction.
    #[error("insufficient data: need at least {needed} bars, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The data provider did not recognise the ticker symbol.
    #[error("invalid ticker: {0}")]
    InvalidTicker(String),

    /// The provider responded but returned no usable bars.
    #[error("no data returned for ticker: {0}")]
    NoData(String),

    /// Transport-level failure talking to the data provider.
    #[error("fetch failure: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The provider returned a payload we could not interpret.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
