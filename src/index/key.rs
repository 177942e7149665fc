//! Key derivation rules used by the documentation generator.
//!
//! A key is the lowercase label with every character outside `[a-z0-9]`
//! escaped as `_xx` (two lowercase hex digits per UTF-8 byte), followed by
//! `_<n>` where `n` is a decimal sequence number that keeps keys unique
//! across the whole table even when two symbols share a label.

use std::fmt::Write;

/// Normalize a display label into the generator's key alphabet.
pub fn normalize_label(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for ch in label.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            key.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                // String formatting is infallible.
                let _ = write!(key, "_{:02x}", byte);
            }
        }
    }
    key
}

/// Build a full key from a label and its table-wide sequence number.
pub fn make_key(label: &str, sequence: u64) -> String {
    format!("{}_{}", normalize_label(label), sequence)
}

/// Split a key into its normalized stem and numeric suffix.
///
/// Returns `None` when the key carries no parseable decimal suffix.
pub fn split_key(key: &str) -> Option<(&str, u64)> {
    let (stem, suffix) = key.rsplit_once('_')?;
    let sequence = suffix.parse().ok()?;
    Some((stem, sequence))
}
