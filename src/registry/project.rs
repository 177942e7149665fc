//! Metadata about registered documentation trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Statistics from the most recent scan of a tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TreeStats {
    /// Number of index shards loaded
    pub shard_count: usize,
    /// Number of entries in the merged table
    pub entry_count: usize,
    /// Total number of documentation anchors
    pub target_count: usize,
}

impl TreeStats {
    pub fn new(shard_count: usize, entry_count: usize, target_count: usize) -> Self {
        Self {
            shard_count,
            entry_count,
            target_count,
        }
    }
}

/// A registered documentation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Human-readable project name
    pub name: String,
    /// Canonical path to the documentation tree root
    pub path: PathBuf,
    /// When the tree was first registered
    pub created_at: DateTime<Utc>,
    /// When the tree was last scanned
    pub last_scanned: Option<DateTime<Utc>>,
    /// Scan statistics (if available)
    pub stats: Option<TreeStats>,
}

impl ProjectInfo {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            created_at: Utc::now(),
            last_scanned: None,
            stats: None,
        }
    }

    /// Update the last scanned timestamp to now.
    pub fn mark_scanned(&mut self) {
        self.last_scanned = Some(Utc::now());
    }

    pub fn update_stats(&mut self, stats: TreeStats) {
        self.stats = Some(stats);
    }

    /// Check if the tree still exists on disk.
    pub fn path_exists(&self) -> bool {
        self.path.exists()
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}
