//! Persistent key-value cache for the last-known-good snapshot.
//!
//! [`CacheStore`] is the opaque get/set-by-string-key seam the rest of the
//! crate depends on; [`FileCacheStore`] backs it with a single JSON object
//! file, [`MemoryCacheStore`] keeps everything in memory for tests and
//! ephemeral runs. [`store_snapshot`] / [`load_snapshot`] translate between
//! an [`AggregateSnapshot`] and the four cache keys, letting the app show
//! stale prices immediately after a restart instead of a blank state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{error, warn};

use crate::models::price::DEFAULT_GOLD_PRICE;
use crate::models::{AggregateSnapshot, PriceEntry, PriceTable};

/// Cache key: stable-asset entries (JSON array of entries).
pub const KEY_STABLECOIN: &str = "stablecoinData";
/// Cache key: normal-asset entries (JSON array of entries).
pub const KEY_UPBIT: &str = "upbitData";
/// Cache key: gold price (stringified number).
pub const KEY_GOLD: &str = "goldPrice";
/// Cache key: snapshot timestamp (ISO-8601 string).
pub const KEY_LAST_UPDATED: &str = "lastUpdated";

/// Opaque persistent key-value store.
///
/// Any backend with string get/set semantics satisfies this; values survive
/// process restarts for persistent implementations.
pub trait CacheStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// File-backed store: one JSON object, written through on every `set`.
pub struct FileCacheStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileCacheStore {
    /// Opens the store, loading existing entries if the file is present.
    ///
    /// A file with unparsable contents is treated as empty rather than
    /// fatal; the cache is best-effort by design.
    ///
    /// # Errors
    ///
    /// Returns [`WoncalcError::Cache`](crate::WoncalcError::Cache) if the
    /// file exists but cannot be read.
    pub fn open(path: &Path) -> crate::Result<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("cache file {} is corrupt, starting empty: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                error!("failed to serialize cache: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            error!("failed to write cache file {}: {e}", self.path.display());
        }
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// In-memory store for tests and cache-less runs.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: BTreeMap<String, String>,
}

impl MemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Writes a snapshot to the store, overwriting any previous one.
///
/// # Errors
///
/// Returns [`WoncalcError::Json`](crate::WoncalcError::Json) if an entry
/// list fails to serialize.
pub fn store_snapshot(store: &mut dyn CacheStore, snapshot: &AggregateSnapshot) -> crate::Result<()> {
    store.set(KEY_STABLECOIN, &serde_json::to_string(snapshot.table.stable())?);
    store.set(KEY_UPBIT, &serde_json::to_string(snapshot.table.normal())?);
    store.set(KEY_GOLD, &snapshot.gold_price.to_string());
    store.set(KEY_LAST_UPDATED, &snapshot.fetched_at.to_rfc3339());
    Ok(())
}

/// Reads the previously stored snapshot, if any usable one exists.
///
/// Returns `None` when neither price key is present or parsable. Loaded
/// snapshots are marked `partial`: every value in them is stale. A missing
/// gold price falls back to the documented default; a missing timestamp
/// falls back to the epoch so the staleness is obvious.
pub fn load_snapshot(store: &dyn CacheStore) -> Option<AggregateSnapshot> {
    let stable = load_entries(store, KEY_STABLECOIN);
    let normal = load_entries(store, KEY_UPBIT);
    if stable.is_none() && normal.is_none() {
        return None;
    }

    let mut table = PriceTable::new();
    for entry in stable.into_iter().flatten().chain(normal.into_iter().flatten()) {
        table.push(entry);
    }

    let gold_price = store
        .get(KEY_GOLD)
        .and_then(|raw| Decimal::from_str(&raw).ok())
        .unwrap_or(DEFAULT_GOLD_PRICE);

    let fetched_at = store
        .get(KEY_LAST_UPDATED)
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.with_timezone(&Utc));

    Some(AggregateSnapshot {
        table,
        gold_price,
        fetched_at,
        partial: true,
    })
}

fn load_entries(store: &dyn CacheStore, key: &str) -> Option<Vec<PriceEntry>> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(entries) => Some(entries),
        Err(e) => {
            warn!("cache key {key} is corrupt, ignoring: {e}");
            None
        }
    }
}
