//! Exchange ticker feed adapter.
//!
//! Fetches a fixed, ordered list of KRW markets in one batched call. The
//! upstream may return items in any order; output always follows the
//! requested list. Markets absent from the response are omitted, not
//! treated as errors. USDT and USDC are stable assets traded on the same
//! exchange, so they are split into the stable partition.

use reqwest::Client;

use crate::error::FetchError;
use crate::models::ticker::TickerItem;
use crate::models::{AssetClass, PriceEntry, PriceSource};

/// Feed name used in errors and logs.
pub const FEED_NAME: &str = "ticker";

/// Market prefix stripped to obtain the display symbol.
const MARKET_PREFIX: &str = "KRW-";

/// Symbols routed to the stable partition despite coming from the exchange.
const STABLE_SYMBOLS: [&str; 2] = ["USDT", "USDC"];

/// Normalized ticker output, split by asset class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerPrices {
    pub stable: Vec<PriceEntry>,
    pub normal: Vec<PriceEntry>,
}

/// Adapter for the batched exchange ticker feed.
pub struct TickerFeed {
    client: Client,
    url: String,
    markets: Vec<String>,
}

impl TickerFeed {
    #[must_use]
    pub fn new(client: Client, url: String, markets: Vec<String>) -> Self {
        Self {
            client,
            url,
            markets,
        }
    }

    /// Fetches all configured markets in a single call and normalizes them.
    pub async fn fetch(&self) -> Result<TickerPrices, FetchError> {
        let request = self
            .client
            .get(&self.url)
            .query(&[("markets", self.markets.join(","))]);
        let items: Vec<TickerItem> = super::send_json(FEED_NAME, request).await?;
        Ok(normalize(&items, &self.markets))
    }
}

/// Re-orders upstream items to the requested market order and splits them
/// into stable and normal partitions.
pub fn normalize(items: &[TickerItem], markets: &[String]) -> TickerPrices {
    let mut prices = TickerPrices::default();

    for market in markets {
        let Some(item) = items.iter().find(|i| &i.market == market) else {
            continue;
        };
        let symbol = market.strip_prefix(MARKET_PREFIX).unwrap_or(market);
        let stable = STABLE_SYMBOLS.contains(&symbol);
        let entry = PriceEntry {
            symbol: symbol.to_string(),
            price: item.trade_price,
            change_pct: None,
            source: PriceSource::Upbit,
            class: if stable {
                AssetClass::Stable
            } else {
                AssetClass::Normal
            },
        };
        if stable {
            prices.stable.push(entry);
        } else {
            prices.normal.push(entry);
        }
    }

    prices
}
