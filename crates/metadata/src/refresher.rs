//! Background metadata refresh
//!
//! [`MetadataRefresher`] polls the loader's version of every cached table
//! on a fixed interval and reloads the tables that changed.
//!
//! # Example
//!
//! ```ignore
//! let cache = Arc::new(TypeMetadataCache::new(loader));
//! let refresher = MetadataRefresher::new(Arc::clone(&cache), Duration::from_secs(30));
//! let handle = refresher.start();
//!
//! // ... serve queries ...
//!
//! refresher.shutdown();
//! handle.join().unwrap();
//! ```

use crate::cache::TypeMetadataCache;
use quarry_core::QueryConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Shutdown is checked at least this often while sleeping
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Background thread keeping a [`TypeMetadataCache`] current
pub struct MetadataRefresher {
    cache: Arc<TypeMetadataCache>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl MetadataRefresher {
    /// Refresher polling every `interval`
    pub fn new(cache: Arc<TypeMetadataCache>, interval: Duration) -> Self {
        Self {
            cache,
            interval,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Refresher using `metadata_refresh_ms` from config
    pub fn from_config(cache: Arc<TypeMetadataCache>, config: &QueryConfig) -> Self {
        Self::new(cache, Duration::from_millis(config.metadata_refresh_ms))
    }

    /// Spawn the refresh thread; it runs until [`shutdown`](Self::shutdown)
    pub fn start(&self) -> JoinHandle<()> {
        let cache = Arc::clone(&self.cache);
        let shutdown = Arc::clone(&self.shutdown);
        let interval = self.interval;

        thread::spawn(move || {
            while !shutdown.load(Ordering::Relaxed) {
                // sleep first, in slices, so shutdown is prompt
                let slice = SHUTDOWN_POLL.min(interval).max(Duration::from_millis(1));
                let mut elapsed = Duration::ZERO;
                while elapsed < interval {
                    if shutdown.load(Ordering::Relaxed) {
                        return;
                    }
                    thread::sleep(slice);
                    elapsed += slice;
                }

                let reloaded = cache.refresh_changed();
                if reloaded > 0 {
                    debug!(target: "quarry::metadata", reloaded, "refreshed changed tables");
                }
            }
        })
    }

    /// Ask the thread to stop; it exits within one poll slice
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Whether shutdown has been requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
