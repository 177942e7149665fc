use std::fs;

use tempfile::tempdir;

use docdex::config::ScannerConfig;
use docdex::scanner::{Scanner, SymbolCategory};

use crate::helpers::test_utils::{write_docs_tree, TREE_ENTRY_COUNT};

#[test]
fn test_scan_loads_all_shards() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    assert_eq!(outcome.report.shards_found, 3);
    assert_eq!(outcome.report.shards_loaded, 3);
    assert_eq!(outcome.index.len(), TREE_ENTRY_COUNT);
    assert!(!outcome.report.errors.has_errors());

    // The two overload groups each contribute an extra anchor.
    assert_eq!(outcome.index.target_count(), TREE_ENTRY_COUNT + 2);
}

#[test]
fn test_scan_tags_entries_with_their_shard_category() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    assert_eq!(
        outcome.index.get("advance_14").unwrap().category,
        Some(SymbolCategory::Functions)
    );
    assert_eq!(
        outcome.index.get("mixerchannel_4").unwrap().category,
        Some(SymbolCategory::Classes)
    );
    assert_eq!(
        outcome.index.get("m_5fgain_20").unwrap().category,
        Some(SymbolCategory::Variables)
    );

    let counts = outcome.index.category_counts();
    assert_eq!(counts["functions"], 4);
    assert_eq!(counts["classes"], 3);
    assert_eq!(counts["variables"], 2);
}

#[test]
fn test_scan_skips_viewer_scripts() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    // search.js exists but is not shard-shaped, so it is never read.
    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();
    assert_eq!(outcome.report.shards_found, 3);
}

#[test]
fn test_scan_records_duplicate_keys_across_shards() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    // A second shard re-declares advance_14 with a different anchor.
    fs::write(
        dir.path().join("search/functions_1.js"),
        "var searchData=\n[\n  ['advance_14',['Advance',['../classOther.html#a1',1,'Other']]]\n];\n",
    )
    .unwrap();

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    assert_eq!(outcome.report.shards_loaded, 4);
    assert_eq!(outcome.index.len(), TREE_ENTRY_COUNT);
    assert_eq!(outcome.report.errors.total_errors, 1);

    // Merge keeps the first occurrence, in sorted path order.
    let kept = outcome.index.get("advance_14").unwrap();
    assert_eq!(kept.targets[0].owner, "ClockSource::Advance(uint64_t ticks)");
}

#[test]
fn test_scan_survives_a_corrupt_shard() {
    let dir = tempdir().unwrap();
    write_docs_tree(dir.path());

    fs::write(
        dir.path().join("search/enums_0.js"),
        "var searchData=[['broken",
    )
    .unwrap();

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    assert_eq!(outcome.report.shards_found, 4);
    assert_eq!(outcome.report.shards_loaded, 3);
    assert_eq!(outcome.index.len(), TREE_ENTRY_COUNT);
    assert_eq!(outcome.report.errors.total_errors, 1);
}

#[test]
fn test_scan_empty_tree() {
    let dir = tempdir().unwrap();

    let scanner = Scanner::new(dir.path(), ScannerConfig::default());
    let outcome = scanner.scan().unwrap();

    assert_eq!(outcome.report.shards_found, 0);
    assert!(outcome.index.is_empty());
}
