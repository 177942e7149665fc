//! Serve command: run the MCP server over stdio.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::load_tree;
use crate::index;
use crate::mcp::DocdexServer;
use crate::search::IndexSearcher;

/// Run the MCP server command.
///
/// Stdout belongs to the MCP transport, so startup information goes
/// through tracing only.
pub async fn run(docs: Option<PathBuf>) -> Result<()> {
    let (resolved, outcome) = load_tree(docs.as_deref(), false)?;

    info!(
        "Serving {} entries from {:?} over MCP",
        outcome.index.len(),
        resolved.docs_root
    );

    let shared = index::shared(outcome.index);
    let searcher = Arc::new(IndexSearcher::new(
        shared.clone(),
        resolved.config.search.clone(),
    ));

    DocdexServer::new(searcher, shared).run().await
}
