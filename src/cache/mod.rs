//! Cache Module
//!
//! Bounded response cache with FIFO-by-insertion eviction.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Maximum number of entries held by one response cache
pub const CACHE_CAPACITY: usize = 10;
