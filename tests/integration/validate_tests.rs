use docdex::index::Anchor;
use docdex::script;
use docdex::validate::{validate_entries, IssueKind};

use crate::helpers::test_utils::{entry, FUNCTIONS_SHARD, VARIABLES_SHARD};

#[test]
fn test_fixture_shards_are_clean() {
    let mut entries = script::parse(FUNCTIONS_SHARD).unwrap();
    entries.extend(script::parse(VARIABLES_SHARD).unwrap());

    let report = validate_entries(&entries);
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.entries_checked, 6);
}

#[test]
fn test_duplicate_keys_across_shards_are_caught() {
    let entries = vec![
        entry("advance_14", "Advance", "../classClock.html#a1", "Clock"),
        entry("advance_14", "Advance", "../classOther.html#a2", "Other"),
    ];

    let report = validate_entries(&entries);
    assert_eq!(report.by_kind()[&IssueKind::DuplicateKey], 1);
}

#[test]
fn test_every_target_is_checked() {
    let mut bad = entry("advance_14", "Advance", "../classClock.html#a1", "Clock");
    bad.targets.push(Anchor::new("", ""));

    let report = validate_entries(&[bad]);
    let by_kind = report.by_kind();
    assert_eq!(by_kind[&IssueKind::EmptyHref], 1);
    assert_eq!(by_kind[&IssueKind::EmptyOwner], 1);
}

#[test]
fn test_suffixless_key_is_malformed() {
    let report = validate_entries(&[entry(
        "advance",
        "Advance",
        "../classClock.html#a1",
        "Clock",
    )]);
    assert_eq!(report.by_kind()[&IssueKind::MalformedKey], 1);
}

#[test]
fn test_mismatched_key_and_label() {
    let report = validate_entries(&[entry(
        "retreat_14",
        "Advance",
        "../classClock.html#a1",
        "Clock",
    )]);
    assert_eq!(report.by_kind()[&IssueKind::KeyLabelMismatch], 1);
}

#[test]
fn test_escaped_operator_key_agrees_with_label() {
    // Keys escape punctuation byte-wise; labels escape HTML-wise. The two
    // encodings must still agree after decoding.
    let report = validate_entries(&[entry(
        "operator_3c_3c_17",
        "operator&lt;&lt;",
        "../classRingBuffer.html#a0f",
        "RingBuffer",
    )]);
    assert!(report.is_clean());
}

#[test]
fn test_issue_counts_accumulate() {
    let entries = vec![
        entry("advance_14", "Advance", "../classClock.html#a1", "Clock"),
        entry("advance_14", "Advance", "", "Clock"),
        entry("broken", "Broken", "../classB.html#a1", "B"),
    ];

    let report = validate_entries(&entries);
    assert!(!report.is_clean());
    assert_eq!(report.issue_count(), 3);
}
