//! Cache module for holding raw API responses in memory
//!
//! This module provides a time-bounded cache keyed by request URL. Entries are
//! reaped by a background sweep task rather than on read, so a lookup may still
//! return an entry that is past its interval but has not been swept yet.

mod timed;

pub use timed::{CacheError, TimedCache, DEFAULT_CACHE_INTERVAL};
