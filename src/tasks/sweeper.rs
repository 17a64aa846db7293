//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired entries nobody reads
//! again, so lazy eviction alone cannot leak them.

use std::hash::Hash;
use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::Shared;

/// Spawns the sweeper for one cache.
///
/// The first sweep happens one full `interval` after the task starts. Every
/// wake-up checks the shutdown channel before sweeping, and the sweep itself
/// re-checks the stopped flag under the store lock; the loop exits once the
/// channel flips to `true`, its sender is dropped, or the cache state is gone.
///
/// # Arguments
/// * `shared` - Weak reference to the cache state being swept
/// * `interval` - Period between sweeps, within `MIN_SWEEP_INTERVAL..=MAX_SWEEP_INTERVAL`
/// * `shutdown_rx` - Receiver flipped to `true` by the cache's stop
///
/// # Returns
/// A JoinHandle that resolves once the loop has exited.
pub(crate) fn spawn_sweeper<K, V>(
    shared: Weak<Shared<K, V>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting cache sweeper with interval of {:?}", interval);

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                // Only `true` is ever sent, and a closed channel means the
                // cache is gone: both end the loop
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {}
            }

            if *shutdown_rx.borrow() {
                break;
            }
            let Some(shared) = shared.upgrade() else {
                break;
            };
            let Some(removed) = shared.sweep(Instant::now()) else {
                break;
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }

        info!("Cache sweeper stopped");
    })
}
