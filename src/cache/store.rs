//! Response Cache Module
//!
//! Fixed-capacity store of computed responses with FIFO eviction.

use crate::cache::{CacheEntry, CacheStats, CACHE_CAPACITY};

// == Response Cache ==
/// Bounded cache mapping a query's identity key to its response.
///
/// Eviction is strictly by insertion order: when full, the entry with the
/// lowest sequence is dropped. A hit never refreshes or reorders an entry,
/// and there is no explicit removal.
#[derive(Debug, Default)]
pub struct ResponseCache {
    /// Entries in insertion order
    entries: Vec<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl ResponseCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(CACHE_CAPACITY),
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the response of the first entry whose identity key matches.
    ///
    /// Entries are scanned in insertion order, so when several entries share
    /// a key the oldest one answers.
    pub fn get(&mut self, identity_key: &str) -> Option<String> {
        match self.entries.iter().find(|entry| entry.matches(identity_key)) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.response.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a response under `identity_key`.
    ///
    /// The first entry gets sequence 0, every later one `max + 1`. When the
    /// cache already holds `CACHE_CAPACITY` entries, the one with the minimum
    /// sequence is evicted first.
    pub fn put(&mut self, identity_key: String, response: String) {
        let sequence = match self.latest_sequence() {
            Some(latest) => latest + 1,
            None => 0,
        };

        if self.entries.len() >= CACHE_CAPACITY {
            self.evict_oldest();
        }

        self.stats.record_store(&response);
        self.entries
            .push(CacheEntry::new(identity_key, sequence, response));
        self.stats.set_total_entries(self.entries.len());
    }

    fn latest_sequence(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.sequence).max()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry.sequence)
            .map(|(idx, _)| idx);

        if let Some(idx) = oldest {
            self.entries.remove(idx);
            self.stats.record_eviction();
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the stored entries in insertion order.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> ResponseCache {
        let mut cache = ResponseCache::new();
        for i in 0..count {
            cache.put(format!("key{i}"), format!("value{i}"));
        }
        cache
    }

    #[test]
    fn test_cache_new() {
        let cache = ResponseCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_put_and_get() {
        let mut cache = ResponseCache::new();

        cache.put("anagarcia lopez".to_string(), "@anag".to_string());

        assert_eq!(cache.get("anagarcia lopez"), Some("@anag".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache = ResponseCache::new();
        assert_eq!(cache.get("nobody"), None);
    }

    #[test]
    fn test_cache_stores_empty_response() {
        let mut cache = ResponseCache::new();

        cache.put("nobody".to_string(), String::new());

        assert_eq!(cache.get("nobody"), Some(String::new()));
    }

    #[test]
    fn test_first_sequence_is_zero() {
        let cache = filled(3);
        let sequences: Vec<u64> = cache.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut cache = filled(CACHE_CAPACITY + 1);

        assert_eq!(cache.len(), CACHE_CAPACITY);
        assert_eq!(cache.get("key0"), None);
        for i in 1..=CACHE_CAPACITY {
            assert_eq!(cache.get(&format!("key{i}")), Some(format!("value{i}")));
        }
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_hit_does_not_protect_from_eviction() {
        let mut cache = filled(CACHE_CAPACITY);

        // key0 is hot, but FIFO ignores access
        for _ in 0..5 {
            assert!(cache.get("key0").is_some());
        }
        cache.put("fresh".to_string(), "value".to_string());

        assert_eq!(cache.get("key0"), None);
        assert!(cache.get("key1").is_some());
    }

    #[test]
    fn test_sequence_continues_after_eviction() {
        let cache = filled(CACHE_CAPACITY + 5);
        let sequences: Vec<u64> = cache.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, (5..15).collect::<Vec<u64>>());
    }

    #[test]
    fn test_duplicate_keys_first_match_wins() {
        let mut cache = ResponseCache::new();

        cache.put("dup".to_string(), "old".to_string());
        cache.put("dup".to_string(), "new".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("dup"), Some("old".to_string()));
    }

    #[test]
    fn test_stale_duplicate_evicted_first() {
        let mut cache = ResponseCache::new();
        cache.put("dup".to_string(), "old".to_string());
        for i in 0..CACHE_CAPACITY - 2 {
            cache.put(format!("key{i}"), String::new());
        }
        cache.put("dup".to_string(), "new".to_string());

        // Full now; the next insert evicts the stale "old" entry
        cache.put("another".to_string(), String::new());

        assert_eq!(cache.get("dup"), Some("new".to_string()));
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = ResponseCache::new();

        cache.put("key1".to_string(), "value1".to_string());
        cache.get("key1"); // hit
        cache.get("nonexistent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.lookups(), 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_cache_stats_count_not_found_responses() {
        let mut cache = ResponseCache::new();

        cache.put("nobody".to_string(), String::new());
        cache.put("anagarcia lopez".to_string(), "@anag".to_string());
        cache.get("nobody");

        let stats = cache.stats();
        assert_eq!(stats.lookups(), 2);
        assert_eq!(stats.not_found_stored, 1);
        assert_eq!(stats.hits, 1);
    }
}
