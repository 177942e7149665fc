//! Index-backed searcher with exact, prefix, substring, and fuzzy modes.

use std::cmp::Ordering;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use glob::Pattern;
use tracing::debug;

use super::traits::Search;
use super::SearchResult;
use crate::config::{SearchConfig, SearchMode};
use crate::index::{key, SearchEntry, SharedIndex};
use crate::metrics;
use crate::scanner::SymbolCategory;

/// A fully-specified lookup request.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// The typed symbol name or fragment
    pub text: String,
    /// Matching strategy override (None = configured default)
    pub mode: Option<SearchMode>,
    /// Result limit override (None = configured default)
    pub limit: Option<usize>,
    /// Glob pattern over entity-decoded owner descriptions
    pub owner_pattern: Option<String>,
    /// Restrict results to one shard category
    pub category: Option<SymbolCategory>,
}

impl QuerySpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: None,
            limit: None,
            owner_pattern: None,
            category: None,
        }
    }
}

/// Searcher over a swappable table snapshot.
pub struct IndexSearcher {
    index: SharedIndex,
    config: SearchConfig,
}

impl IndexSearcher {
    pub fn new(index: SharedIndex, config: SearchConfig) -> Self {
        Self { index, config }
    }

    /// Run a query with explicit mode, limit, and filters.
    ///
    /// Queries are folded through the generator's key normalization before
    /// matching, so `Insert`, `insert`, and `operator<<` all behave the way
    /// the documentation search box does.
    pub async fn query(&self, spec: &QuerySpec) -> Result<Vec<SearchResult>> {
        let started = Instant::now();
        metrics::SEARCH_REQUESTS.inc();

        let mode = spec.mode.unwrap_or(self.config.mode);
        let limit = spec.limit.unwrap_or(self.config.default_limit);
        let needle = key::normalize_label(&spec.text);

        let owner_glob = match &spec.owner_pattern {
            Some(pattern) => Some(Pattern::new(pattern)?),
            None => None,
        };

        let snapshot = self.index.read().await.clone();

        let mut matched: Vec<(&SearchEntry, f32)> = match mode {
            SearchMode::Exact => snapshot
                .entries()
                .iter()
                .filter(|e| e.stem() == needle)
                .map(|e| (e, 1.0))
                .collect(),
            SearchMode::Prefix => snapshot
                .find_by_prefix(&needle)
                .into_iter()
                .map(|e| (e, 0.9))
                .collect(),
            SearchMode::Substring => snapshot
                .find_by_substring(&needle)
                .into_iter()
                .map(|e| (e, 0.7))
                .collect(),
            SearchMode::Fuzzy => snapshot
                .find_fuzzy(&needle, self.config.max_fuzzy_distance)
                .into_iter()
                .map(|(e, distance)| (e, 1.0 / (1.0 + distance as f32)))
                .collect(),
        };

        // Deterministic ordering: score first, then key.
        matched.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.key.cmp(&b.0.key))
        });

        let mut results = Vec::new();
        'outer: for (entry, score) in matched {
            if let Some(category) = spec.category {
                if entry.category != Some(category) {
                    continue;
                }
            }

            for target in &entry.targets {
                if let Some(ref pattern) = owner_glob {
                    if !pattern.matches(&target.decoded_owner()) {
                        continue;
                    }
                }

                results.push(SearchResult {
                    key: entry.key.clone(),
                    label: entry.decoded_label(),
                    href: target.href.clone(),
                    owner: target.decoded_owner(),
                    category: entry.category,
                    score,
                });

                if results.len() >= limit {
                    break 'outer;
                }
            }
        }

        metrics::SEARCH_LATENCY.observe(started.elapsed().as_secs_f64());
        metrics::SEARCH_RESULTS.observe(results.len() as f64);

        debug!(
            "Query '{}' ({}) matched {} rows",
            spec.text,
            mode,
            results.len()
        );

        Ok(results)
    }
}

#[async_trait]
impl Search for IndexSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let mut spec = QuerySpec::new(query);
        spec.limit = Some(limit);
        self.query(&spec).await
    }

    fn search_type(&self) -> &'static str {
        self.config.mode.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{self, Anchor, SearchIndex};

    fn build_searcher(mode: SearchMode) -> IndexSearcher {
        let mut index = SearchIndex::new();
        index
            .insert(SearchEntry::new(
                "render_0",
                "Render",
                vec![
                    Anchor::new("../classCanvas.html#a1", "Canvas::Render()"),
                    Anchor::new("../classWidget.html#a2", "Widget::Render()"),
                ],
            ))
            .unwrap();
        index
            .insert(SearchEntry::new(
                "renderall_1",
                "RenderAll",
                vec![Anchor::new("../classCanvas.html#a3", "Canvas")],
            ))
            .unwrap();
        index
            .insert(SearchEntry::new(
                "resize_2",
                "Resize",
                vec![Anchor::new("../classWidget.html#a4", "Widget")],
            ))
            .unwrap();

        let config = SearchConfig {
            mode,
            ..SearchConfig::default()
        };
        IndexSearcher::new(index::shared(index), config)
    }

    #[tokio::test]
    async fn test_exact_mode() {
        let searcher = build_searcher(SearchMode::Exact);
        let results = searcher.search("Render", 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.key == "render_0"));
    }

    #[tokio::test]
    async fn test_prefix_mode_flattens_targets() {
        let searcher = build_searcher(SearchMode::Prefix);
        let results = searcher.search("render", 10).await.unwrap();

        // Two anchors for Render plus one for RenderAll.
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].label, "Render");
    }

    #[tokio::test]
    async fn test_limit_applies_to_rows() {
        let searcher = build_searcher(SearchMode::Prefix);
        let results = searcher.search("render", 1).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_fuzzy_mode_tolerates_typos() {
        let searcher = build_searcher(SearchMode::Fuzzy);
        let results = searcher.search("resise", 10).await.unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].key, "resize_2");
    }

    #[tokio::test]
    async fn test_owner_filter() {
        let searcher = build_searcher(SearchMode::Prefix);
        let spec = QuerySpec {
            owner_pattern: Some("Widget*".to_string()),
            ..QuerySpec::new("render")
        };
        let results = searcher.query(&spec).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].owner, "Widget::Render()");
    }

    #[tokio::test]
    async fn test_query_normalization() {
        let searcher = build_searcher(SearchMode::Prefix);
        // Mixed case folds down to the key alphabet.
        let results = searcher.search("RenderA", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "renderall_1");
    }

    #[tokio::test]
    async fn test_snapshot_swap_is_visible() {
        let searcher = build_searcher(SearchMode::Prefix);
        let handle = searcher.index.clone();

        let mut replacement = SearchIndex::new();
        replacement
            .insert(SearchEntry::new(
                "attach_0",
                "Attach",
                vec![Anchor::new("../classBus.html#a1", "Bus")],
            ))
            .unwrap();
        *handle.write().await = std::sync::Arc::new(replacement);

        assert!(searcher.search("render", 10).await.unwrap().is_empty());
        assert_eq!(searcher.search("attach", 10).await.unwrap().len(), 1);
    }
}
