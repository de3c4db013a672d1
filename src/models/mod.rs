//! Shared models for price data.
//!
//! Contains the canonical price types produced by aggregation
//! ([`price::PriceEntry`], [`price::PriceTable`], [`price::AggregateSnapshot`])
//! and the per-feed wire models matching each upstream's JSON shape.

pub mod gold;
pub mod price;
pub mod stablecoin;
pub mod ticker;

pub use price::{AggregateSnapshot, AssetClass, PriceEntry, PriceSource, PriceTable};
