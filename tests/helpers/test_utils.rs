use std::fs;
use std::path::Path;

use docdex::index::{Anchor, SearchEntry};

/// A functions shard with an overload group and an entity-escaped operator.
pub const FUNCTIONS_SHARD: &str = include_str!("../fixtures/search/functions_0.js");

/// A classes shard.
pub const CLASSES_SHARD: &str = include_str!("../fixtures/search/classes_0.js");

/// A variables shard with escaped underscores in the keys.
pub const VARIABLES_SHARD: &str = include_str!("../fixtures/search/variables_0.js");

/// Total entries across the three fixture shards.
pub const TREE_ENTRY_COUNT: usize = 9;

/// Build a one-target entry for tests.
pub fn entry(key: &str, label: &str, href: &str, owner: &str) -> SearchEntry {
    SearchEntry::new(key, label, vec![Anchor::new(href, owner)])
}

/// Lay a documentation tree out on disk: the three fixture shards under
/// `search/` plus a viewer script that must be ignored.
pub fn write_docs_tree(root: &Path) {
    let search_dir = root.join("search");
    fs::create_dir_all(&search_dir).unwrap();

    fs::write(search_dir.join("functions_0.js"), FUNCTIONS_SHARD).unwrap();
    fs::write(search_dir.join("classes_0.js"), CLASSES_SHARD).unwrap();
    fs::write(search_dir.join("variables_0.js"), VARIABLES_SHARD).unwrap();
    fs::write(search_dir.join("search.js"), "// viewer script, not a shard\n").unwrap();
}
