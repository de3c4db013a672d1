//! Price source adapters, one per upstream feed.
//!
//! Each adapter owns its upstream's quirks: URL and query construction,
//! response-shape validation, and normalization into [`PriceEntry`] values.
//! Every failure mode is converted into a [`FetchError`] at the adapter
//! boundary; nothing here panics or returns a raw transport error.
//!
//! [`PriceEntry`]: crate::models::PriceEntry

pub mod gold;
pub mod stablecoin;
pub mod ticker;

pub use gold::GoldFeed;
pub use stablecoin::StablecoinFeed;
pub use ticker::{TickerFeed, TickerPrices};

use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Sends a prepared request and decodes the JSON body.
///
/// Transport failures (unreachable, timeout) and non-2xx statuses become
/// [`FetchError::Network`]; an undecodable body becomes
/// [`FetchError::UpstreamShape`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    feed: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, FetchError> {
    let response = request.send().await.map_err(|e| FetchError::Network {
        feed,
        detail: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Network {
            feed,
            detail: format!("upstream returned status {status}"),
        });
    }

    response.json::<T>().await.map_err(|e| FetchError::UpstreamShape {
        feed,
        detail: e.to_string(),
    })
}
