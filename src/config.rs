//! Application configuration loaded from environment variables.
//!
//! All values have working defaults except the gold feed credential:
//! - `WONCALC_STABLECOIN_URL` — stablecoin price endpoint override
//! - `WONCALC_TICKER_URL` — exchange ticker endpoint override
//! - `WONCALC_GOLD_URL` — gold price endpoint override
//! - `GOLD_API_KEY` — service key for the gold feed (optional; without it
//!   the gold feed degrades to cached/default values)
//! - `WONCALC_REFRESH_SECS` — refresh interval in seconds (default 600)
//! - `WONCALC_CACHE_PATH` — snapshot cache file (default `woncalc-cache.json`)

use std::path::PathBuf;
use std::time::Duration;

/// Default stablecoin price endpoint (KRW quotes with 24h change).
const DEFAULT_STABLECOIN_URL: &str = "https://api.coingecko.com/api/v3/simple/price\
?ids=true-usd,dai,gemini-dollar&vs_currencies=krw&include_24hr_change=true";

/// Default batched ticker endpoint; the market list is appended as a query.
const DEFAULT_TICKER_URL: &str = "https://api.upbit.com/v1/ticker";

/// Default gold price endpoint (FSC general product info).
const DEFAULT_GOLD_URL: &str =
    "https://apis.data.go.kr/1160100/service/GetGeneralProductInfoService/getGeneralProductInfo";

/// Default refresh cadence: 10 minutes.
const DEFAULT_REFRESH_SECS: u64 = 600;

/// Markets requested from the ticker feed, in display order.
///
/// The adapter's output follows this order regardless of how the upstream
/// orders its response. USDT and USDC are routed to the stable partition.
pub const TICKER_MARKETS: [&str; 9] = [
    "KRW-BTC", "KRW-ETH", "KRW-XRP", "KRW-SOL", "KRW-DOGE", "KRW-TRX", "KRW-ADA", "KRW-USDT",
    "KRW-USDC",
];

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stablecoin_url: String,
    pub ticker_url: String,
    pub gold_url: String,
    pub gold_api_key: Option<String>,
    /// Ordered market list for the ticker feed.
    pub ticker_markets: Vec<String>,
    pub refresh_interval: Duration,
    pub cache_path: PathBuf,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`WoncalcError::Config`](crate::WoncalcError::Config) if
/// `WONCALC_REFRESH_SECS` is set but not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let refresh_secs = match non_empty_var("WONCALC_REFRESH_SECS") {
        Some(raw) => raw.parse::<u64>().ok().filter(|&s| s > 0).ok_or_else(|| {
            crate::WoncalcError::Config(format!(
                "WONCALC_REFRESH_SECS must be a positive integer, got {raw:?}"
            ))
        })?,
        None => DEFAULT_REFRESH_SECS,
    };

    Ok(AppConfig {
        stablecoin_url: non_empty_var("WONCALC_STABLECOIN_URL")
            .unwrap_or_else(|| DEFAULT_STABLECOIN_URL.to_string()),
        ticker_url: non_empty_var("WONCALC_TICKER_URL")
            .unwrap_or_else(|| DEFAULT_TICKER_URL.to_string()),
        gold_url: non_empty_var("WONCALC_GOLD_URL").unwrap_or_else(|| DEFAULT_GOLD_URL.to_string()),
        gold_api_key: non_empty_var("GOLD_API_KEY"),
        ticker_markets: TICKER_MARKETS.iter().map(|m| m.to_string()).collect(),
        refresh_interval: Duration::from_secs(refresh_secs),
        cache_path: PathBuf::from(
            non_empty_var("WONCALC_CACHE_PATH").unwrap_or_else(|| "woncalc-cache.json".to_string()),
        ),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
