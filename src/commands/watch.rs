//! Watch command implementation.
//!
//! Keeps a loaded table in memory and reloads it wholesale whenever the
//! generator rewrites the index shards.

use std::path::PathBuf;

use anyhow::Result;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::info;

use super::load_tree;
use crate::index;
use crate::watcher::{ShardWatcher, WatcherConfig};

/// Run the watch command.
///
/// # Arguments
/// * `debounce_ms` - Debounce delay in milliseconds
/// * `docs` - Optional explicit documentation tree path
pub async fn run(debounce_ms: u64, docs: Option<PathBuf>) -> Result<()> {
    let (resolved, outcome) = load_tree(docs.as_deref(), true)?;
    outcome.report.print_summary();

    println!();
    println!("Starting watch mode...");
    println!("Watching tree: {:?}", resolved.docs_root);
    println!("Debounce delay: {}ms", debounce_ms);
    println!();
    println!("Press Ctrl+C to stop.");
    println!();

    let shared = index::shared(outcome.index);
    let watcher = ShardWatcher::new(
        resolved.docs_root,
        resolved.config.scanner.clone(),
        shared,
        WatcherConfig { debounce_ms },
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let watcher_handle = tokio::spawn(async move { watcher.run(shutdown_rx).await });

    signal::ctrl_c().await?;

    println!();
    println!("Shutting down...");

    let _ = shutdown_tx.send(());
    let stats = watcher_handle.await??;

    println!();
    println!("Watch session complete!");
    println!("----------------------------------------");
    println!("  Reloads:        {}", stats.reloads);
    println!("  Current entries: {}", stats.entries_loaded);
    if stats.errors > 0 {
        println!("  Errors:         {}", stats.errors);
    }
    println!("----------------------------------------");

    info!("Watch session ended");

    Ok(())
}
