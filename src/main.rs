// =============================================================================
// Meridian — Scan Runner Entry Point
// =============================================================================
//
// Loads the scan configuration, fans a batch scan out over the configured
// universe, and writes the breakout report as JSON on stdout. Presentation
// beyond that is someone else's job.

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meridian::scanner::find_breakout_candidates;
use meridian::{scan_tickers, ScanConfig, YahooClient};

const CONFIG_PATH: &str = "scan_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ScanConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ScanConfig::default()
    });

    // Override the universe from the environment if set.
    if let Ok(syms) = std::env::var("MERIDIAN_TICKERS") {
        config.tickers = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    info!(
        tickers = config.tickers.len(),
        period = %config.period,
        interval = %config.interval,
        "starting batch scan"
    );

    // ── 2. Scan ──────────────────────────────────────────────────────────
    let client = YahooClient::new();
    let tickers = config.tickers.clone();
    let records = scan_tickers(&client, &tickers, &config, None).await;

    info!(
        scanned = records.len(),
        skipped = tickers.len() - records.len(),
        "batch scan complete"
    );

    // ── 3. Report ────────────────────────────────────────────────────────
    let candidates = find_breakout_candidates(&records);
    for record in &candidates {
        info!(
            ticker = %record.ticker,
            score = record.breakout_score,
            price = record.current_price,
            rel_volume = ?record.relative_volume,
            crossover = %record.ma_crossover,
            "breakout candidate"
        );
    }

    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}
