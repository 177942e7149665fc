//! Canonical shard serialization.
//!
//! Emits the exact layout the generator uses: a two-line prelude, one entry
//! per line with two-space indentation, and a `];` footer. Parsing the
//! output of [`write_table`] yields the input entries unchanged.

use crate::index::SearchEntry;

/// Render a table in the generator's canonical layout.
pub fn write_table(entries: &[SearchEntry]) -> String {
    let mut out = String::from("var searchData=\n[\n");

    for (i, entry) in entries.iter().enumerate() {
        out.push_str("  ['");
        out.push_str(&escape(&entry.key));
        out.push_str("',['");
        out.push_str(&escape(&entry.label));
        out.push('\'');

        for target in &entry.targets {
            out.push_str(",['");
            out.push_str(&escape(&target.href));
            out.push_str("',");
            out.push_str(&target.flags.to_string());
            out.push_str(",'");
            out.push_str(&escape(&target.owner));
            out.push_str("']");
        }

        out.push_str("]]");
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str("];\n");
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out
}
