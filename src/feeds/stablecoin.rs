//! Stablecoin price feed adapter.
//!
//! Fetches KRW quotes for a fixed set of USD stablecoins and normalizes the
//! feed's id-keyed response into [`PriceEntry`] values. Coins missing from
//! the response are omitted, not treated as errors.

use reqwest::Client;
use rust_decimal::Decimal;

use crate::error::FetchError;
use crate::models::stablecoin::StablecoinResponse;
use crate::models::{AssetClass, PriceEntry, PriceSource};

/// Feed name used in errors and logs.
pub const FEED_NAME: &str = "stablecoin";

/// Fixed feed-id to display-symbol mapping, in output order.
const SYMBOL_MAP: [(&str, &str); 3] = [
    ("true-usd", "TUSD"),
    ("dai", "DAI"),
    ("gemini-dollar", "GUSD"),
];

/// Adapter for the stablecoin price feed.
pub struct StablecoinFeed {
    client: Client,
    url: String,
}

impl StablecoinFeed {
    #[must_use]
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }

    /// Fetches and normalizes the current stablecoin quotes.
    pub async fn fetch(&self) -> Result<Vec<PriceEntry>, FetchError> {
        let response: StablecoinResponse =
            super::send_json(FEED_NAME, self.client.get(&self.url)).await?;
        Ok(normalize(&response))
    }
}

/// Converts the id-keyed upstream response into ordered price entries.
///
/// The 24h change defaults to zero when the feed omits it, so downstream
/// display code never has to distinguish "flat" from "unknown" for this feed.
pub fn normalize(response: &StablecoinResponse) -> Vec<PriceEntry> {
    SYMBOL_MAP
        .iter()
        .filter_map(|(id, symbol)| {
            response.get(*id).map(|quote| PriceEntry {
                symbol: (*symbol).to_string(),
                price: quote.krw,
                change_pct: Some(quote.krw_24h_change.unwrap_or(Decimal::ZERO)),
                source: PriceSource::Coingecko,
                class: AssetClass::Stable,
            })
        })
        .collect()
}
