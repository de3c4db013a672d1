//! Refresh scheduling: one cycle at startup, then on a fixed interval,
//! plus a manual retry channel.
//!
//! Cycles are serialized by construction: each refresh is awaited before
//! the next trigger is considered, so a slow cycle delays the following
//! one instead of overlapping it and snapshots can never be applied out
//! of order. Shutdown is simply closing the retry channel; in-flight
//! requests are left to finish on their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::aggregator::Aggregator;
use crate::cache::{CacheStore, store_snapshot};
use crate::models::AggregateSnapshot;

/// Latest published snapshot, shared read-only with consumers.
pub type SharedSnapshot = Option<Arc<AggregateSnapshot>>;

/// Drives the aggregator on a fixed cadence and publishes each snapshot.
pub struct Scheduler {
    aggregator: Aggregator,
    cache: Box<dyn CacheStore + Send>,
    interval: Duration,
    previous: Option<AggregateSnapshot>,
}

impl Scheduler {
    /// Creates a scheduler. `previous` seeds the stale-fallback chain,
    /// typically with a snapshot loaded from the cache store.
    #[must_use]
    pub fn new(
        aggregator: Aggregator,
        cache: Box<dyn CacheStore + Send>,
        interval: Duration,
        previous: Option<AggregateSnapshot>,
    ) -> Self {
        Self {
            aggregator,
            cache,
            interval,
            previous,
        }
    }

    /// Runs the refresh loop until the retry channel is closed.
    ///
    /// The first interval tick completes immediately, giving the startup
    /// refresh. A message on `retry` triggers an extra cycle; requests
    /// arriving while a cycle is in flight coalesce into one.
    pub async fn run(
        mut self,
        snapshots: watch::Sender<SharedSnapshot>,
        mut retry: mpsc::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                request = retry.recv() => {
                    if request.is_none() {
                        info!("Retry channel closed, stopping refresh loop");
                        break;
                    }
                    info!("Manual refresh requested");
                }
            }
            self.refresh_once(&snapshots).await;
        }
    }

    async fn refresh_once(&mut self, snapshots: &watch::Sender<SharedSnapshot>) {
        let snapshot = self.aggregator.refresh(self.previous.as_ref()).await;

        if snapshot.partial {
            warn!(
                "Refresh cycle complete with stale or fallback values ({} assets)",
                snapshot.table.stable().len() + snapshot.table.normal().len()
            );
        } else {
            info!(
                "Refresh cycle complete: {} stable, {} normal, gold {}",
                snapshot.table.stable().len(),
                snapshot.table.normal().len(),
                snapshot.gold_price
            );
        }

        if let Err(e) = store_snapshot(self.cache.as_mut(), &snapshot) {
            error!("Failed to persist snapshot: {e}");
        }

        let shared = Arc::new(snapshot.clone());
        self.previous = Some(snapshot);
        // Consumers may come and go; a lagging or absent receiver is fine.
        let _ = snapshots.send(Some(shared));
    }
}
