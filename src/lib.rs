//! KRW conversion calculator library.
//!
//! Aggregates three independent price feeds (stablecoins, exchange tickers,
//! gold) into immutable snapshots with stale-cache fallback, and provides a
//! bidirectional KRW/asset conversion engine over the merged price table.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod converter;
pub mod error;
pub mod feeds;
pub mod models;
pub mod scheduler;

pub use error::{FetchError, Result, WoncalcError};
