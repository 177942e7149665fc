use docdex::script::{self, ScriptError};

use crate::helpers::test_utils::{CLASSES_SHARD, FUNCTIONS_SHARD, VARIABLES_SHARD};

#[test]
fn test_parse_functions_shard() {
    let entries = script::parse(FUNCTIONS_SHARD).unwrap();

    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].key, "advance_14");
    assert_eq!(entries[0].label, "Advance");
    assert_eq!(entries[0].targets.len(), 2);
    assert_eq!(
        entries[0].targets[0].owner,
        "ClockSource::Advance(uint64_t ticks)"
    );
    assert_eq!(entries[0].targets[1].href, "../classTransport.html#a2c8e6b3fd4a81f46");
    assert!(entries.iter().all(|e| e.targets.iter().all(|t| t.flags == 1)));
}

#[test]
fn test_parse_preserves_entry_order() {
    let entries = script::parse(FUNCTIONS_SHARD).unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["advance_14", "applygain_15", "attachbus_16", "operator_3c_3c_17"]
    );
}

#[test]
fn test_entity_escaped_label_decodes() {
    let entries = script::parse(FUNCTIONS_SHARD).unwrap();
    let operator = &entries[3];

    assert_eq!(operator.label, "operator&lt;&lt;");
    assert_eq!(operator.decoded_label(), "operator<<");
}

#[test]
fn test_fixture_shards_are_canonical() {
    // parse -> write reproduces the generator's layout byte for byte.
    for shard in [FUNCTIONS_SHARD, CLASSES_SHARD, VARIABLES_SHARD] {
        let entries = script::parse(shard).unwrap();
        assert_eq!(script::write_table(&entries), shard);
    }
}

#[test]
fn test_round_trip_is_identity() {
    let entries = script::parse(FUNCTIONS_SHARD).unwrap();
    let reparsed = script::parse(&script::write_table(&entries)).unwrap();
    assert_eq!(entries, reparsed);
}

#[test]
fn test_non_canonical_whitespace_still_parses() {
    let squeezed = "var searchData=[['advance_14',['Advance',['../classClockSource.html#a91',1,'ClockSource']]]];";
    let entries = script::parse(squeezed).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "advance_14");
}

#[test]
fn test_missing_prelude_is_rejected() {
    assert!(matches!(
        script::parse("[['a_0',['A',['../a.html',1,'A']]]];"),
        Err(ScriptError::MissingPrelude)
    ));
}

#[test]
fn test_truncated_shard_is_rejected() {
    let truncated = &FUNCTIONS_SHARD[..FUNCTIONS_SHARD.len() / 2];
    assert!(script::parse(truncated).is_err());
}
