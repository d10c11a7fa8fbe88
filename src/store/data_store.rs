//! Data Store Module
//!
//! Network-partitioned, case-insensitive index from person names to handles.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::Result;
use crate::store::Record;

// == Name Key ==
/// Lowercase-normalized identity of a person inside one network table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey {
    given: Vec<String>,
    last: (String, String),
}

impl NameKey {
    /// Builds a key, lowercasing every name token.
    pub fn new(given_names: &[String], last_names: &(String, String)) -> Self {
        Self {
            given: given_names.iter().map(|name| name.to_lowercase()).collect(),
            last: (last_names.0.to_lowercase(), last_names.1.to_lowercase()),
        }
    }
}

// == Data Store ==
/// Immutable table of handles, keyed by network then by normalized names.
///
/// Networks are kept in a `BTreeMap` so aggregate lookups always report
/// matches in the same (alphabetical) order.
#[derive(Debug, Default)]
pub struct DataStore {
    networks: BTreeMap<String, HashMap<NameKey, String>>,
}

impl DataStore {
    // == Load ==
    /// Reads and parses the record file at `path`.
    ///
    /// Fails with `ParseError` on the first line with fewer than 4 fields.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    // == Parse ==
    /// Builds a store from record file contents. Blank lines are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let mut store = Self::default();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            store.insert(Record::parse(idx + 1, line)?);
        }
        Ok(store)
    }

    fn insert(&mut self, record: Record) {
        let key = NameKey::new(&record.given_names, &record.last_names);
        self.networks
            .entry(record.network)
            .or_default()
            .insert(key, record.handle);
    }

    // == Scoped ==
    /// Keeps only the table of `network`, dropping every other one.
    pub fn scoped(mut self, network: &str) -> Self {
        self.networks.retain(|name, _| name == network);
        self
    }

    // == Lookup ==
    /// Returns the handle of a person on one network.
    pub fn lookup(
        &self,
        network: &str,
        given_names: &[String],
        last_names: &(String, String),
    ) -> Option<&str> {
        let key = NameKey::new(given_names, last_names);
        self.networks
            .get(network)
            .and_then(|table| table.get(&key))
            .map(String::as_str)
    }

    // == Lookup All ==
    /// Returns every `(network, handle)` pair recorded for a person.
    pub fn lookup_all(
        &self,
        given_names: &[String],
        last_names: &(String, String),
    ) -> Vec<(&str, &str)> {
        let key = NameKey::new(given_names, last_names);
        self.networks
            .iter()
            .filter_map(|(network, table)| {
                table
                    .get(&key)
                    .map(|handle| (network.as_str(), handle.as_str()))
            })
            .collect()
    }

    /// Returns the networks present in the store, in lookup order.
    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// Returns the total number of indexed records.
    pub fn len(&self) -> usize {
        self.networks.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
