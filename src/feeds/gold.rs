//! Gold price feed adapter.
//!
//! Queries the public product-info API for today's listings and scans for
//! the gold commodity row among the returned items. The scan can genuinely
//! come up empty (market holiday, price not yet published); that surfaces
//! as [`FetchError::NotFound`] rather than a silent default — the fallback
//! decision belongs to the aggregator.

use std::str::FromStr;

use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::error::FetchError;
use crate::models::gold::GoldResponse;

/// Feed name used in errors and logs.
pub const FEED_NAME: &str = "gold";

/// Marker token identifying the gold row among listed commodities.
const GOLD_MARKER: &str = "금";

/// Adapter for the gold price feed.
pub struct GoldFeed {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl GoldFeed {
    #[must_use]
    pub fn new(client: Client, url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    /// Fetches today's gold closing price in KRW.
    ///
    /// Fails with [`FetchError::Config`] when no API key is configured and
    /// [`FetchError::NotFound`] when no gold row exists for today's date.
    pub async fn fetch(&self) -> Result<Decimal, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::Config {
            feed: FEED_NAME,
            detail: "GOLD_API_KEY is not set".to_string(),
        })?;

        let bas_dt = Utc::now().format("%Y%m%d").to_string();
        let request = self.client.get(&self.url).query(&[
            ("serviceKey", api_key),
            ("numOfRows", "10"),
            ("pageNo", "1"),
            ("resultType", "json"),
            ("basDt", bas_dt.as_str()),
        ]);

        let response: GoldResponse = super::send_json(FEED_NAME, request).await?;
        extract_gold_price(&response)
    }
}

/// Scans the item list for the gold row and parses its closing price.
pub fn extract_gold_price(response: &GoldResponse) -> Result<Decimal, FetchError> {
    let items = response
        .response
        .body
        .as_ref()
        .and_then(|body| body.items.as_ref())
        .ok_or_else(|| FetchError::UpstreamShape {
            feed: FEED_NAME,
            detail: "missing response.body.items".to_string(),
        })?;

    let gold_item = items
        .item
        .iter()
        .find(|item| {
            item.item_name
                .as_deref()
                .is_some_and(|name| name.contains(GOLD_MARKER))
        })
        .ok_or_else(|| FetchError::NotFound {
            feed: FEED_NAME,
            detail: "no gold price listed for today".to_string(),
        })?;

    let closing = gold_item.clpr.as_deref().ok_or_else(|| FetchError::NotFound {
        feed: FEED_NAME,
        detail: "gold item has no closing price".to_string(),
    })?;

    Decimal::from_str(closing).map_err(|_| FetchError::UpstreamShape {
        feed: FEED_NAME,
        detail: format!("unparsable closing price {closing:?}"),
    })
}
