//! MCP server implementation for documentation index search.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::SearchMode;
use crate::index::SharedIndex;
use crate::search::{IndexSearcher, QuerySpec};

/// Request parameters for index search
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Symbol name or name fragment to look up
    #[schemars(description = "Symbol name or name fragment to look up in the documentation index")]
    query: String,

    /// Matching strategy (default: the configured mode)
    #[schemars(description = "Matching strategy: exact, prefix, substring, or fuzzy (default: the configured mode)")]
    mode: Option<String>,

    /// Maximum number of results to return (default: 10)
    #[schemars(description = "Maximum number of results to return (default: 10)")]
    limit: Option<usize>,
}

/// Request parameters for fetching one entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LookupRequest {
    /// Exact entry key, numeric suffix included
    #[schemars(description = "Exact entry key, numeric suffix included (e.g. 'render_12')")]
    key: String,
}

/// Request parameters for listing owner classes
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListOwnersRequest {
    /// Optional glob pattern filtering owner names
    #[schemars(description = "Optional glob pattern filtering owner names (e.g. 'Mixer*')")]
    pattern: Option<String>,
}

/// MCP server over a loaded documentation search table.
///
/// Exposes the same lookups as the CLI and the web API over the Model
/// Context Protocol, using the stdio transport.
///
/// # Example
///
/// ```ignore
/// use docdex::mcp::DocdexServer;
///
/// let server = DocdexServer::new(searcher, index);
/// server.run().await?;
/// ```
#[derive(Clone)]
pub struct DocdexServer {
    searcher: Arc<IndexSearcher>,
    index: SharedIndex,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DocdexServer {
    /// Create a new MCP server over the given table.
    pub fn new(searcher: Arc<IndexSearcher>, index: SharedIndex) -> Self {
        Self {
            searcher,
            index,
            tool_router: Self::tool_router(),
        }
    }

    /// Search the index for symbols by name
    #[tool(
        name = "search",
        description = "Search the documentation index for symbols by name. Returns matching symbols with their documentation anchors and owning classes."
    )]
    async fn search(
        &self,
        Parameters(req): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mode = match req.mode.as_deref() {
            Some(raw) => Some(
                raw.parse::<SearchMode>()
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            ),
            None => None,
        };

        let spec = QuerySpec {
            text: req.query.clone(),
            mode,
            limit: Some(req.limit.unwrap_or(10)),
            owner_pattern: None,
            category: None,
        };

        let results = self
            .searcher
            .query(&spec)
            .await
            .map_err(|e| McpError::internal_error(format!("Search failed: {}", e), None))?;

        let mut output = String::new();

        if results.is_empty() {
            output.push_str("No index entries matched the query.");
        } else {
            output.push_str(&format!(
                "Found {} result(s) for query: \"{}\"\n\n",
                results.len(),
                req.query
            ));

            for (i, result) in results.iter().enumerate() {
                output.push_str(&format!(
                    "## Result {} (relevance: {:.1}%)\n",
                    i + 1,
                    result.score * 100.0
                ));
                output.push_str(&format!("**Symbol:** {}\n", result.label));
                if !result.owner.is_empty() {
                    output.push_str(&format!("**Owner:** {}\n", result.owner));
                }
                if let Some(category) = result.category {
                    output.push_str(&format!("**Category:** {}\n", category));
                }
                output.push_str(&format!("**Anchor:** {}\n\n", result.href));
            }
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Fetch one entry by its exact key
    #[tool(
        name = "lookup",
        description = "Fetch one index entry by its exact key, including every documentation anchor registered for it."
    )]
    async fn lookup(
        &self,
        Parameters(req): Parameters<LookupRequest>,
    ) -> Result<CallToolResult, McpError> {
        let snapshot = self.index.read().await.clone();

        let entry = snapshot.get(&req.key).ok_or_else(|| {
            McpError::invalid_params(format!("No entry with key '{}'", req.key), None)
        })?;

        let mut output = format!("# {}\n\n", entry.decoded_label());
        output.push_str(&format!("Key: `{}`\n", entry.key));
        if let Some(category) = entry.category {
            output.push_str(&format!("Category: {}\n", category));
        }
        output.push_str(&format!("\n{} anchor(s):\n", entry.targets.len()));
        for target in &entry.targets {
            output.push_str(&format!("- {}: {}\n", target.decoded_owner(), target.href));
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// List owner classes appearing in the index
    #[tool(
        name = "list_owners",
        description = "List the owner classes that appear in the documentation index, optionally filtered by a glob pattern."
    )]
    async fn list_owners(
        &self,
        Parameters(req): Parameters<ListOwnersRequest>,
    ) -> Result<CallToolResult, McpError> {
        let snapshot = self.index.read().await.clone();
        let mut owners = snapshot.owners();

        if let Some(ref pattern) = req.pattern {
            let glob = glob::Pattern::new(pattern).map_err(|e| {
                McpError::invalid_params(format!("Invalid pattern '{}': {}", pattern, e), None)
            })?;
            owners.retain(|owner| glob.matches(owner));
        }

        let output = if owners.is_empty() {
            match &req.pattern {
                Some(p) => format!("No owners matching pattern: {}", p),
                None => "The index contains no owner descriptions.".to_string(),
            }
        } else {
            let header = match &req.pattern {
                Some(p) => format!("Owners matching '{}' ({} total):\n", p, owners.len()),
                None => format!("All owners ({} total):\n", owners.len()),
            };
            format!("{}{}", header, owners.join("\n"))
        };

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Run the MCP server using stdio transport
    pub async fn run(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for DocdexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "docdex".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("docdex Documentation Search".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "docdex MCP Server - Search the generated documentation index.\n\n\
                 Available tools:\n\
                 - search: Find symbols by name with exact, prefix, substring, or fuzzy matching\n\
                 - lookup: Fetch one entry by its exact key with all of its anchors\n\
                 - list_owners: List the classes that own documented symbols\n\n\
                 Use 'search' to resolve a symbol name to its documentation anchors. \
                 Use 'lookup' when you already know an entry's key. \
                 Use 'list_owners' to explore which classes are documented."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let json = r#"{"query": "render"}"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.query, "render");
        assert!(req.mode.is_none());
        assert!(req.limit.is_none());
    }

    #[test]
    fn test_search_request_with_mode_and_limit() {
        let json = r#"{"query": "render", "mode": "fuzzy", "limit": 5}"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.mode.as_deref(), Some("fuzzy"));
        assert_eq!(req.limit, Some(5));
    }

    #[test]
    fn test_lookup_request() {
        let json = r#"{"key": "render_12"}"#;
        let req: LookupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "render_12");
    }

    #[test]
    fn test_list_owners_request_no_pattern() {
        let json = r#"{}"#;
        let req: ListOwnersRequest = serde_json::from_str(json).unwrap();
        assert!(req.pattern.is_none());
    }
}
