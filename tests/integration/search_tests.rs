use std::sync::Arc;

use tempfile::tempdir;

use docdex::config::{ScannerConfig, SearchConfig, SearchMode};
use docdex::index;
use docdex::scanner::{Scanner, SymbolCategory};
use docdex::search::{IndexSearcher, QuerySpec, Search};

use crate::helpers::test_utils::write_docs_tree;

async fn searcher_over_fixture_tree(mode: SearchMode) -> IndexSearcher {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    let config = SearchConfig {
        mode,
        ..SearchConfig::default()
    };
    IndexSearcher::new(index::shared(outcome.index), config)
}

#[tokio::test]
async fn test_prefix_search_matches_the_typed_box_behavior() {
    let searcher = searcher_over_fixture_tree(SearchMode::Prefix).await;

    let results = searcher.search("A", 50).await.unwrap();
    // Advance (2 anchors), ApplyGain (2 anchors), AttachBus (1 anchor).
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.label.starts_with('A')));
}

#[tokio::test]
async fn test_exact_search_returns_only_whole_stems() {
    let searcher = searcher_over_fixture_tree(SearchMode::Exact).await;

    let results = searcher.search("Advance", 50).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.key == "advance_14"));

    assert!(searcher.search("Advan", 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_substring_search() {
    let searcher = searcher_over_fixture_tree(SearchMode::Substring).await;

    let results = searcher.search("gain", 50).await.unwrap();
    // ApplyGain (2 anchors) and m_gain (1 anchor).
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_fuzzy_search_tolerates_typos() {
    let searcher = searcher_over_fixture_tree(SearchMode::Fuzzy).await;

    let results = searcher.search("advence", 50).await.unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0].key, "advance_14");
}

#[tokio::test]
async fn test_operator_lookup_through_normalization() {
    let searcher = searcher_over_fixture_tree(SearchMode::Exact).await;

    // The typed query is plain text; the key stores the escaped stem.
    let results = searcher.search("operator<<", 50).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "operator<<");
    assert_eq!(results[0].owner, "RingBuffer");
}

#[tokio::test]
async fn test_owner_filter_narrows_anchors() {
    let searcher = searcher_over_fixture_tree(SearchMode::Prefix).await;

    let spec = QuerySpec {
        owner_pattern: Some("MixerChannel*".to_string()),
        ..QuerySpec::new("a")
    };
    let results = searcher.query(&spec).await.unwrap();

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.owner.starts_with("MixerChannel")));
}

#[tokio::test]
async fn test_category_filter() {
    let searcher = searcher_over_fixture_tree(SearchMode::Prefix).await;

    let spec = QuerySpec {
        category: Some(SymbolCategory::Classes),
        ..QuerySpec::new("")
    };
    let results = searcher.query(&spec).await.unwrap();

    assert_eq!(results.len(), 3);
    assert!(results
        .iter()
        .all(|r| r.category == Some(SymbolCategory::Classes)));
}

#[tokio::test]
async fn test_limit_truncates_rows() {
    let searcher = searcher_over_fixture_tree(SearchMode::Prefix).await;

    let results = searcher.search("a", 2).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_results_are_deterministic() {
    let searcher = searcher_over_fixture_tree(SearchMode::Prefix).await;

    let first = searcher.search("m", 50).await.unwrap();
    let second = searcher.search("m", 50).await.unwrap();

    let first_keys: Vec<_> = first.iter().map(|r| r.key.clone()).collect();
    let second_keys: Vec<_> = second.iter().map(|r| r.key.clone()).collect();
    assert_eq!(first_keys, second_keys);
}

#[tokio::test]
async fn test_regeneration_swap_is_visible_through_searcher() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();
    let shared = index::shared(outcome.index);
    let searcher = IndexSearcher::new(shared.clone(), SearchConfig::default());

    assert!(!searcher.search("advance", 10).await.unwrap().is_empty());

    // Regenerate the tree with different content and rescan, the way the
    // watcher does.
    std::fs::write(
        dir.path().join("search/functions_0.js"),
        "var searchData=\n[\n  ['flush_30',['Flush',['../classBusRouter.html#a77',1,'BusRouter']]]\n];\n",
    )
    .unwrap();

    let rescan = Scanner::new(dir.path(), ScannerConfig::default())
        .scan()
        .unwrap();
    *shared.write().await = Arc::new(rescan.index);

    assert!(searcher.search("advance", 10).await.unwrap().is_empty());
    assert_eq!(searcher.search("flush", 10).await.unwrap().len(), 1);
}
