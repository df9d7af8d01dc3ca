//! Cache Module
//!
//! Bounded in-memory cache for job-posting lookups with TTL expiry and
//! insertion-order eviction.

mod clock;
mod entry;
mod order;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

use crate::models::JobDetails;

// == Public Constants ==
/// Time a lookup result may be served from the cache
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Number of job postings kept before the oldest is evicted
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// The lookup cache as shared between request handlers.
pub type SharedJobCache = Arc<RwLock<CacheStore<JobDetails>>>;
