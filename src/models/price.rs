//! Canonical price types shared by the aggregator, cache, and converter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default gold price (KRW per gram) used when every other source is exhausted.
pub const DEFAULT_GOLD_PRICE: Decimal = Decimal::from_parts(90000, 0, 0, false, 0);

/// Which kind of asset a price entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Pegged 1:1 to USD.
    Stable,
    /// Any other tracked cryptocurrency.
    Normal,
}

/// Which upstream feed a price entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Coingecko,
    Upbit,
}

/// One asset's price within a single aggregate snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub symbol: String,
    /// KRW per 1 unit. Never negative.
    pub price: Decimal,
    /// 24-hour change in percent, where the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<Decimal>,
    pub source: PriceSource,
    pub class: AssetClass,
}

/// Immutable mapping from symbol to price, partitioned by asset class.
///
/// Built fresh on every aggregation cycle and never mutated afterwards;
/// consumers hold it as a read-only value. Insertion order is preserved
/// within each partition (it follows the feeds' fixed symbol ordering),
/// and a symbol is stored at most once per table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    stable: Vec<PriceEntry>,
    normal: Vec<PriceEntry>,
}

impl PriceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the partition matching its class.
    ///
    /// A symbol already present anywhere in the table is skipped, keeping
    /// symbols unique within one snapshot (first entry wins).
    pub fn push(&mut self, entry: PriceEntry) {
        if self.get(&entry.symbol).is_some() {
            return;
        }
        match entry.class {
            AssetClass::Stable => self.stable.push(entry),
            AssetClass::Normal => self.normal.push(entry),
        }
    }

    /// Looks up an entry by symbol across both partitions.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&PriceEntry> {
        self.stable
            .iter()
            .chain(self.normal.iter())
            .find(|e| e.symbol == symbol)
    }

    /// KRW price for a symbol, or `None` if the symbol is not tracked.
    #[must_use]
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol).map(|e| e.price)
    }

    /// Stable-asset entries in feed order.
    #[must_use]
    pub fn stable(&self) -> &[PriceEntry] {
        &self.stable
    }

    /// Normal-asset entries in feed order.
    #[must_use]
    pub fn normal(&self) -> &[PriceEntry] {
        &self.normal
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stable.is_empty() && self.normal.is_empty()
    }
}

/// One complete, immutable result of a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    pub table: PriceTable,
    /// KRW gold price. Always present; falls back to [`DEFAULT_GOLD_PRICE`].
    pub gold_price: Decimal,
    pub fetched_at: DateTime<Utc>,
    /// `true` when at least one feed failed and a cached fallback or
    /// default value was substituted.
    pub partial: bool,
}
