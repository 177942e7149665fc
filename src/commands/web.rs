//! Web command: start the search UI and JSON API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::oneshot;

use super::load_tree;
use crate::index;
use crate::search::IndexSearcher;
use crate::watcher::{ShardWatcher, WatcherConfig};
use crate::web::{AppState, WebServer};

/// Run the web server command.
///
/// # Arguments
/// * `port` - The port to listen on
/// * `watch` - Reload the table when the shards are regenerated
/// * `docs` - Optional explicit documentation tree path
pub async fn run(port: u16, watch: bool, docs: Option<PathBuf>) -> Result<()> {
    let (resolved, outcome) = load_tree(docs.as_deref(), true)?;
    outcome.report.print_summary();

    let shared = index::shared(outcome.index);
    let searcher = Arc::new(IndexSearcher::new(
        shared.clone(),
        resolved.config.search.clone(),
    ));

    let mut watcher_task = None;
    let mut shutdown_tx = None;
    if watch {
        let (tx, rx) = oneshot::channel();
        let watcher = ShardWatcher::new(
            resolved.docs_root.clone(),
            resolved.config.scanner.clone(),
            shared.clone(),
            WatcherConfig::default(),
        );
        watcher_task = Some(tokio::spawn(watcher.run(rx)));
        shutdown_tx = Some(tx);
        println!("Watch mode: table reloads automatically on regeneration");
    }

    let host = resolved.config.server.host.clone();
    let state = AppState::new(
        searcher,
        shared,
        resolved.config,
        resolved.docs_root,
    );

    let server = WebServer::new(state);
    let result = server.start(&host, port).await;

    if let Some(tx) = shutdown_tx {
        let _ = tx.send(());
    }
    if let Some(task) = watcher_task {
        let _ = task.await;
    }

    result
}
