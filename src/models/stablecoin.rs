//! Wire model for the stablecoin price feed (CoinGecko simple-price shape).

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response body: mapping from feed id (e.g. `"true-usd"`) to a KRW quote.
pub type StablecoinResponse = HashMap<String, StablecoinQuote>;

/// KRW quote for a single stablecoin.
#[derive(Debug, Deserialize)]
pub struct StablecoinQuote {
    pub krw: Decimal,
    /// Absent when the feed has no 24h history for the coin.
    #[serde(default)]
    pub krw_24h_change: Option<Decimal>,
}
