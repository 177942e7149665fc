//! Shared state for the web search server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::index::SharedIndex;
use crate::search::IndexSearcher;

/// State cloned into every request handler. The inner Arcs keep the actual
/// data shared; the index handle is swappable so watch mode can replace
/// the table under a running server.
#[derive(Clone)]
pub struct AppState {
    /// Searcher over the current table snapshot
    pub searcher: Arc<IndexSearcher>,
    /// Swappable table snapshot handle
    pub index: SharedIndex,
    /// Configuration
    pub config: Config,
    /// Root of the documentation tree being served
    pub docs_root: PathBuf,
}

impl AppState {
    pub fn new(
        searcher: Arc<IndexSearcher>,
        index: SharedIndex,
        config: Config,
        docs_root: PathBuf,
    ) -> Self {
        Self {
            searcher,
            index,
            config,
            docs_root,
        }
    }
}
