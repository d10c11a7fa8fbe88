//! Cache Statistics Module
//!
//! Counts how often a backend answered from its response cache and how
//! often it had to go to the data store, including cached not-found answers.

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Queries answered from a cached response
    pub hits: u64,
    /// Queries with no cached response
    pub misses: u64,
    /// Responses stored after a data store lookup
    pub stored: u64,
    /// Stored responses that were empty (the name was not found)
    pub not_found_stored: u64,
    /// Entries dropped by the FIFO policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookups ==
    /// Number of data store lookups behind this cache.
    ///
    /// Every stored response comes from exactly one lookup, so a repeated
    /// query answered from the cache leaves this unchanged.
    pub fn lookups(&self) -> u64 {
        self.stored
    }

    /// Share of queries answered without a lookup, or 0.0 before any query.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records a stored response; an empty body counts as not found.
    pub fn record_store(&mut self, response: &str) {
        self.stored += 1;
        if response.is_empty() {
            self.not_found_stored += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_count_stored_responses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_store("@anag");
        stats.record_hit();
        stats.record_hit();

        assert_eq!(stats.lookups(), 1);
        assert_eq!(stats.not_found_stored, 0);
    }

    #[test]
    fn test_not_found_response_is_counted() {
        let mut stats = CacheStats::new();
        stats.record_store("");
        stats.record_store("instagram,@anag\r\n");

        assert_eq!(stats.lookups(), 2);
        assert_eq!(stats.not_found_stored, 1);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 0.75);
    }
}
