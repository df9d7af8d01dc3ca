//! Expired Entry Sweep
//!
//! Background task that periodically drops lookup results past their TTL.
//! Reads already refuse stale entries; the sweep only returns their memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedJobCache;

/// Spawns a background task that purges expired cache entries every
/// `interval_secs` seconds.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(cache: SharedJobCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use crate::cache::{CacheStore, ManualClock};
    use crate::models::JobDetails;

    fn job() -> JobDetails {
        JobDetails {
            title: "Engineer".to_string(),
            department: "R&D".to_string(),
            location: "Remote".to_string(),
        }
    }

    fn shared_cache(clock: Arc<ManualClock>) -> SharedJobCache {
        Arc::new(RwLock::new(CacheStore::with_clock(
            100,
            Duration::from_secs(300),
            clock,
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = shared_cache(clock.clone());
        cache.write().await.put("stale", job());
        clock.advance(Duration::from_secs(300));

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(!cache.read().await.contains_key("stale"));
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_fresh_entries() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = shared_cache(clock.clone());
        cache.write().await.put("fresh", job());
        clock.advance(Duration::from_secs(10));

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.write().await.get("fresh"), Some(job()));
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache = shared_cache(Arc::new(ManualClock::new(0)));

        let handle = spawn_sweep_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
