//! Time-bounded cache for raw response bodies
//!
//! Provides a `TimedCache` that stores opaque byte payloads keyed by string,
//! stamps each entry with its insertion time, and evicts old entries from a
//! background sweep task that wakes once per interval.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Default sweep interval and maximum entry age: 5 minutes.
pub const DEFAULT_CACHE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Errors that can occur when constructing a cache
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The sweep interval was zero
    #[error("Cache interval must be greater than zero")]
    ZeroInterval,
}

/// A stored payload together with the moment it was inserted
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload
    value: Bytes,
    /// When the entry was inserted
    created_at: Instant,
}

impl CacheEntry {
    fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    /// Check if this entry is strictly older than `ttl` at `now`.
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > ttl
    }
}

type EntryMap = Arc<Mutex<HashMap<String, CacheEntry>>>;

/// Shutdown state shared by every handle to one cache
#[derive(Debug)]
struct SweepControl {
    /// Set once the sweep has been told to stop
    stopped: AtomicBool,
    /// Channel for signalling the sweep task
    shutdown_tx: mpsc::Sender<()>,
}

/// In-memory cache whose entries expire after a fixed interval
///
/// A single mutex guards the entry map and is held for exactly one `add`,
/// `get`, or sweep pass. Eviction happens only on sweep ticks, which are spaced
/// one interval apart, so an entry lives between 1x and 2x the interval.
///
/// There is no size bound: if entries are added faster than they age out the
/// map keeps growing.
///
/// Cloning is cheap; clones share the same entries and sweep task. The sweep
/// task ends on `stop_sweep` or once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct TimedCache {
    entries: EntryMap,
    interval: Duration,
    control: Arc<SweepControl>,
}

impl TimedCache {
    /// Creates an empty cache and spawns its sweep task
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Arguments
    /// * `interval` - Sweep period and maximum age of an entry
    ///
    /// # Returns
    /// * `Ok(TimedCache)` with the sweep task running
    /// * `Err(CacheError::ZeroInterval)` if `interval` is zero
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }

        let entries: EntryMap = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(sweep_loop(Arc::clone(&entries), interval, shutdown_rx));
        log::debug!("Started cache sweep every {:?}", interval);

        Ok(Self {
            entries,
            interval,
            control: Arc::new(SweepControl {
                stopped: AtomicBool::new(false),
                shutdown_tx,
            }),
        })
    }

    /// Returns the configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Inserts or overwrites the entry for `key`, stamped with the current time
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let entry = CacheEntry::new(value.into());
        lock_entries(&self.entries).insert(key.into(), entry);
    }

    /// Looks up `key`, returning its payload regardless of age
    ///
    /// Returns `None` only if the key was never added or has been swept.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        lock_entries(&self.entries)
            .get(key)
            .map(|entry| entry.value.clone())
    }

    /// Returns the number of entries currently held
    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        lock_entries(&self.entries).is_empty()
    }

    /// Returns true until `stop_sweep` has been called
    pub fn is_sweeping(&self) -> bool {
        !self.control.stopped.load(Ordering::Acquire)
    }

    /// Signals the sweep task to stop
    ///
    /// Calling this more than once is a no-op. After it returns the task has
    /// been signalled; at most one tick that was already running may finish.
    /// `add` and `get` keep working but entries are no longer reaped.
    pub fn stop_sweep(&self) {
        if self.control.stopped.swap(true, Ordering::AcqRel) {
            return;
        }

        // Capacity 1 and a single send, so this only fails if the task is gone
        let _ = self.control.shutdown_tx.try_send(());
        log::info!("Stopped cache sweep");
    }
}

/// Locks the entry map, recovering it if another thread panicked while holding it
fn lock_entries(
    entries: &Mutex<HashMap<String, CacheEntry>>,
) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Removes every entry older than `ttl` at `now`, returning how many were removed
fn evict_expired(
    entries: &Mutex<HashMap<String, CacheEntry>>,
    now: Instant,
    ttl: Duration,
) -> usize {
    let mut map = lock_entries(entries);
    let before = map.len();
    map.retain(|_, entry| !entry.is_expired(now, ttl));
    before - map.len()
}

/// Background task that sweeps expired entries once per `period`
async fn sweep_loop(entries: EntryMap, period: Duration, mut shutdown_rx: mpsc::Receiver<()>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the first tick (immediate)
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            // Also fires with `None` once every cache handle is dropped
            _ = shutdown_rx.recv() => {
                break;
            }
            _ = ticker.tick() => {
                let removed = evict_expired(&entries, Instant::now(), period);
                if removed > 0 {
                    log::debug!("Swept {} expired cache entries", removed);
                }
            }
        }
    }

    log::debug!("Cache sweep task exited");
}
