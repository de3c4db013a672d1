//! Aggregation of all price feeds into one snapshot per refresh cycle.
//!
//! [`Aggregator::refresh`] fans the three adapters out concurrently and
//! collects every outcome independently (settle-all, not fail-fast): one
//! feed's failure never blocks or invalidates the others. Failed feeds are
//! substituted from the previous snapshot where possible, so a refresh
//! always yields a renderable snapshot and never returns an error.

use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::feeds::{GoldFeed, StablecoinFeed, TickerFeed, TickerPrices};
use crate::models::price::DEFAULT_GOLD_PRICE;
use crate::models::{AggregateSnapshot, PriceEntry, PriceSource, PriceTable};

/// Per-request timeout so one slow feed cannot stall the settle-all join.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Raw per-feed outcomes of one refresh cycle, before merging.
pub struct FeedOutcomes {
    pub stablecoin: Result<Vec<PriceEntry>, FetchError>,
    pub ticker: Result<TickerPrices, FetchError>,
    pub gold: Result<Decimal, FetchError>,
}

/// Runs all feed adapters and merges their results into snapshots.
pub struct Aggregator {
    stablecoin: StablecoinFeed,
    ticker: TickerFeed,
    gold: GoldFeed,
}

impl Aggregator {
    /// Builds the aggregator and its shared HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WoncalcError::Http`](crate::WoncalcError::Http) if the
    /// client cannot be constructed.
    pub fn new(config: &AppConfig) -> crate::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            stablecoin: StablecoinFeed::new(client.clone(), config.stablecoin_url.clone()),
            ticker: TickerFeed::new(
                client.clone(),
                config.ticker_url.clone(),
                config.ticker_markets.clone(),
            ),
            gold: GoldFeed::new(client, config.gold_url.clone(), config.gold_api_key.clone()),
        })
    }

    /// Runs one refresh cycle.
    ///
    /// All three fetches run concurrently; each settles on its own. The
    /// merged snapshot substitutes entries from `previous` for any feed
    /// that failed and is marked `partial` when that happens.
    pub async fn refresh(&self, previous: Option<&AggregateSnapshot>) -> AggregateSnapshot {
        let (stablecoin, ticker, gold) = tokio::join!(
            self.stablecoin.fetch(),
            self.ticker.fetch(),
            self.gold.fetch(),
        );

        merge(
            FeedOutcomes {
                stablecoin,
                ticker,
                gold,
            },
            previous,
        )
    }
}

/// Merges per-feed outcomes with the previous snapshot into a new one.
///
/// For a failed feed, the previous snapshot's entries from that feed's
/// source are carried over; with no previous snapshot the feed's asset
/// class is simply absent (no placeholders are invented). The gold price
/// alone has a hardcoded last-resort default so it is always present.
pub fn merge(outcomes: FeedOutcomes, previous: Option<&AggregateSnapshot>) -> AggregateSnapshot {
    let mut table = PriceTable::new();
    let mut partial = false;

    match outcomes.stablecoin {
        Ok(entries) => {
            for entry in entries {
                table.push(entry);
            }
        }
        Err(err) => {
            partial = true;
            warn!("{} feed failed, substituting cached entries: {err}", err.feed());
            if let Some(prev) = previous {
                for entry in prev.table.stable() {
                    if entry.source == PriceSource::Coingecko {
                        table.push(entry.clone());
                    }
                }
            }
        }
    }

    match outcomes.ticker {
        Ok(prices) => {
            for entry in prices.stable.into_iter().chain(prices.normal) {
                table.push(entry);
            }
        }
        Err(err) => {
            partial = true;
            warn!("{} feed failed, substituting cached entries: {err}", err.feed());
            if let Some(prev) = previous {
                let carried = prev
                    .table
                    .stable()
                    .iter()
                    .filter(|e| e.source == PriceSource::Upbit)
                    .chain(prev.table.normal().iter());
                for entry in carried {
                    table.push(entry.clone());
                }
            }
        }
    }

    let gold_price = match outcomes.gold {
        Ok(price) => price,
        Err(err) => {
            partial = true;
            warn!("{} feed failed, using fallback price: {err}", err.feed());
            previous.map_or(DEFAULT_GOLD_PRICE, |prev| prev.gold_price)
        }
    };

    AggregateSnapshot {
        table,
        gold_price,
        fetched_at: Utc::now(),
        partial,
    }
}
