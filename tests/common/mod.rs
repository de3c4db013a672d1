//! Shared test builders.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use woncalc::models::{AggregateSnapshot, AssetClass, PriceEntry, PriceSource, PriceTable};

/// Builds a price entry with no 24h change.
pub fn entry(symbol: &str, price: Decimal, source: PriceSource, class: AssetClass) -> PriceEntry {
    PriceEntry {
        symbol: symbol.to_string(),
        price,
        change_pct: None,
        source,
        class,
    }
}

/// Builds a table from entries, partitioned by each entry's class.
pub fn table(entries: Vec<PriceEntry>) -> PriceTable {
    let mut table = PriceTable::new();
    for e in entries {
        table.push(e);
    }
    table
}

/// Builds a complete (non-partial) snapshot with a fixed timestamp.
pub fn snapshot(entries: Vec<PriceEntry>, gold_price: Decimal) -> AggregateSnapshot {
    AggregateSnapshot {
        table: table(entries),
        gold_price,
        fetched_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
        partial: false,
    }
}
