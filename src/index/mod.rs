//! In-memory search table built from parsed index shards.
//!
//! The table is immutable after load: the generator replaces the shard
//! files wholesale on every documentation rebuild, and consumers swap in a
//! fresh [`SearchIndex`] snapshot through a [`SharedIndex`] handle.

pub mod entry;
pub mod key;

pub use entry::{Anchor, SearchEntry};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

/// Error returned when an inserted key is already present in the table.
#[derive(Debug, Error)]
#[error("duplicate key `{key}` in search table")]
pub struct DuplicateKey {
    pub key: String,
}

/// Order-preserving table of search entries with a unique-key lookup map.
#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    by_key: HashMap<String, usize>,
    target_count: usize,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already-merged entries, rejecting duplicates.
    pub fn from_entries(entries: Vec<SearchEntry>) -> Result<Self, DuplicateKey> {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry)?;
        }
        Ok(index)
    }

    /// Append an entry, preserving insertion order. Fails if the key is
    /// already present; the table keeps the first occurrence.
    pub fn insert(&mut self, entry: SearchEntry) -> Result<(), DuplicateKey> {
        if self.by_key.contains_key(&entry.key) {
            return Err(DuplicateKey {
                key: entry.key.clone(),
            });
        }
        self.target_count += entry.targets.len();
        self.by_key.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Exact lookup by full key, suffix included.
    pub fn get(&self, key: &str) -> Option<&SearchEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of anchors across all entries.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Entries whose key stem starts with the given normalized prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&SearchEntry> {
        self.entries
            .iter()
            .filter(|e| e.stem().starts_with(prefix))
            .collect()
    }

    /// Entries whose key stem contains the given normalized fragment.
    pub fn find_by_substring(&self, needle: &str) -> Vec<&SearchEntry> {
        self.entries
            .iter()
            .filter(|e| e.stem().contains(needle))
            .collect()
    }

    /// Entries whose key stem is within `max_distance` edits of the query,
    /// best matches first. Ties keep table order.
    pub fn find_fuzzy(&self, query: &str, max_distance: usize) -> Vec<(&SearchEntry, usize)> {
        let mut results: Vec<(&SearchEntry, usize)> = self
            .entries
            .iter()
            .filter_map(|e| {
                let distance = levenshtein(query, e.stem());
                (distance <= max_distance).then_some((e, distance))
            })
            .collect();

        results.sort_by_key(|(_, distance)| *distance);
        results
    }

    /// Sorted, deduplicated owner descriptions (entity-decoded) across all
    /// targets.
    pub fn owners(&self) -> Vec<String> {
        let owners: BTreeSet<String> = self
            .entries
            .iter()
            .flat_map(|e| e.targets.iter())
            .map(|t| t.decoded_owner())
            .collect();
        owners.into_iter().collect()
    }

    /// Entry counts per shard category, for stats output.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            let bucket = entry
                .category
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "uncategorized".to_string());
            *counts.entry(bucket).or_insert(0) += 1;
        }
        counts
    }
}

/// Shared, swappable snapshot handle used by the servers and the watcher.
pub type SharedIndex = Arc<RwLock<Arc<SearchIndex>>>;

/// Wrap a freshly-built index into a shared handle.
pub fn shared(index: SearchIndex) -> SharedIndex {
    Arc::new(RwLock::new(Arc::new(index)))
}

/// Edit distance with the classic two-row dynamic program.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j + 1] + 1)
                .min(current[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
