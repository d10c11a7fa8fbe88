//! Cache Entry Module
//!
//! Defines the structure for individual response cache entries.

// == Cache Entry ==
/// A previously computed response, tagged with its insertion sequence.
///
/// Entries are never updated in place. Re-caching the same identity key
/// creates a second entry with a newer sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Joined given names and last names of the query
    pub identity_key: String,
    /// Insertion order; unique and strictly increasing within one cache
    pub sequence: u64,
    /// Response body, possibly empty for a not-found result
    pub response: String,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(identity_key: String, sequence: u64, response: String) -> Self {
        Self {
            identity_key,
            sequence,
            response,
        }
    }

    /// Returns true if this entry answers the given identity key.
    pub fn matches(&self, identity_key: &str) -> bool {
        self.identity_key == identity_key
    }
}
