use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::info;

use woncalc::WoncalcError;
use woncalc::aggregator::Aggregator;
use woncalc::cache::{FileCacheStore, load_snapshot};
use woncalc::config::fetch_config;
use woncalc::converter::{Converter, format_coin_amount, format_krw_amount};
use woncalc::scheduler::Scheduler;

#[tokio::main]
async fn main() -> Result<(), WoncalcError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;

    let cache = FileCacheStore::open(&config.cache_path)?;
    let cached = load_snapshot(&cache);
    if let Some(snapshot) = &cached {
        // Show stale prices immediately instead of a blank state.
        info!("Loaded cached prices from {}", snapshot.fetched_at);
    }

    let aggregator = Aggregator::new(&config)?;
    let (snapshot_tx, mut snapshot_rx) = watch::channel(cached.clone().map(Arc::new));
    let (_retry_tx, retry_rx) = mpsc::channel::<()>(1);

    tokio::spawn(async move {
        while snapshot_rx.changed().await.is_ok() {
            let Some(snapshot) = snapshot_rx.borrow_and_update().clone() else {
                continue;
            };
            let converter = Converter::new(&snapshot.table);
            let state = converter.state();
            info!(
                "{} KRW = {} {} | gold {} KRW/g{}",
                format_krw_amount(state.krw_amount),
                format_coin_amount(state.coin_amount),
                state.selected_symbol,
                format_krw_amount(snapshot.gold_price),
                if snapshot.partial { " (partial)" } else { "" },
            );
        }
    });

    let scheduler = Scheduler::new(aggregator, Box::new(cache), config.refresh_interval, cached);
    scheduler.run(snapshot_tx, retry_rx).await;

    Ok(())
}
