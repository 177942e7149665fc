//! Search trait shared by the CLI, web, and MCP front-ends.

use anyhow::Result;
use async_trait::async_trait;

use super::SearchResult;

/// Common interface over the table lookup strategies.
///
/// Implementations resolve queries against a table snapshot; the snapshot
/// may be swapped between calls when watch mode reloads the index.
#[async_trait]
pub trait Search: Send + Sync {
    /// Run a query with the implementation's default mode.
    ///
    /// # Arguments
    /// * `query` - The typed symbol name or fragment
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Results sorted by relevance (highest score first)
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Identifier of the active matching strategy, such as "prefix" or
    /// "fuzzy".
    fn search_type(&self) -> &'static str;
}
