//! Wholesale table reload when the generator rewrites the index shards.
//!
//! The search table has no incremental update path: documentation rebuilds
//! replace every shard. The watcher therefore debounces filesystem events,
//! ignores anything that is not a shard, and rescans the whole tree when a
//! regeneration lands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebouncedEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use crate::config::ScannerConfig;
use crate::index::SharedIndex;
use crate::metrics;
use crate::scanner::{Scanner, Walker};

/// Configuration for the shard watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce delay in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

/// Statistics accumulated over a watch session.
#[derive(Debug, Clone, Default)]
pub struct ReloadStats {
    /// Number of wholesale reloads performed
    pub reloads: usize,
    /// Entry count after the most recent reload
    pub entries_loaded: usize,
    /// Reloads that failed
    pub errors: usize,
}

/// Watches a documentation tree and swaps fresh table snapshots into a
/// [`SharedIndex`] whenever the shards are regenerated.
pub struct ShardWatcher {
    docs_root: PathBuf,
    scanner_config: ScannerConfig,
    index: SharedIndex,
    config: WatcherConfig,
}

impl ShardWatcher {
    pub fn new(
        docs_root: PathBuf,
        scanner_config: ScannerConfig,
        index: SharedIndex,
        config: WatcherConfig,
    ) -> Self {
        Self {
            docs_root,
            scanner_config,
            index,
            config,
        }
    }

    /// Watch until the shutdown signal fires.
    pub async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) -> Result<ReloadStats> {
        let debounce = Duration::from_millis(self.config.debounce_ms);

        let (tx, mut rx) = mpsc::channel::<Vec<DebouncedEvent>>(16);

        let tx_clone = tx.clone();
        let mut debouncer = new_debouncer(
            debounce,
            None,
            move |result: std::result::Result<Vec<DebouncedEvent>, Vec<notify::Error>>| {
                match result {
                    Ok(events) => {
                        if !events.is_empty() {
                            if let Err(e) = tx_clone.blocking_send(events) {
                                error!("Failed to send debounced events: {}", e);
                            }
                        }
                    }
                    Err(errors) => {
                        for error in errors {
                            error!("Watch error: {}", error);
                        }
                    }
                }
            },
        )
        .context("Failed to create shard watcher")?;

        debouncer
            .watch(&self.docs_root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch directory: {:?}", self.docs_root))?;

        info!("Watching {:?} for regenerated shards", self.docs_root);
        info!("Debounce delay: {}ms", self.config.debounce_ms);

        let mut stats = ReloadStats::default();

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received, stopping watcher");
                    break;
                }

                Some(events) = rx.recv() => {
                    if !touches_shards(&events) {
                        continue;
                    }

                    match self.reload().await {
                        Ok(entries) => {
                            stats.reloads += 1;
                            stats.entries_loaded = entries;
                            println!("Reloaded search table: {} entries", entries);
                        }
                        Err(e) => {
                            stats.errors += 1;
                            error!("Reload failed: {}", e);
                        }
                    }
                }
            }
        }

        Ok(stats)
    }

    /// Rescan the tree and swap the snapshot in.
    async fn reload(&self) -> Result<usize> {
        metrics::REGENERATIONS_DETECTED.inc();

        let scanner = Scanner::new(self.docs_root.clone(), self.scanner_config.clone());
        let outcome = tokio::task::spawn_blocking(move || scanner.scan())
            .await
            .context("Scan task panicked")??;

        if outcome.report.errors.has_errors() {
            outcome.report.errors.print_summary();
        }

        let entries = outcome.index.len();
        *self.index.write().await = Arc::new(outcome.index);
        info!("Swapped in fresh table snapshot with {} entries", entries);

        Ok(entries)
    }
}

/// Whether any debounced event touched an index shard.
fn touches_shards(events: &[DebouncedEvent]) -> bool {
    events
        .iter()
        .any(|event| event.paths.iter().any(|path| Walker::is_shard(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_config_default() {
        let config = WatcherConfig::default();
        assert_eq!(config.debounce_ms, 500);
    }
}
