//! Record types for the documentation search table.

use serde::{Deserialize, Serialize};

use crate::scanner::SymbolCategory;
use crate::script::entities;

use super::key;

/// One documentation anchor: a single declaration site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Relative link into the generated HTML pages, including the fragment
    /// that points at the symbol's description.
    pub href: String,

    /// Numeric link flag the generator writes between the link and the
    /// owner description. Preserved verbatim so rewrites are lossless.
    #[serde(default = "default_flags")]
    pub flags: u8,

    /// Description of the owning class or scope, possibly with the full
    /// signature when several overloads share a label.
    pub owner: String,
}

fn default_flags() -> u8 {
    1
}

impl Anchor {
    pub fn new(href: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            flags: default_flags(),
            owner: owner.into(),
        }
    }

    /// Owner description with HTML entity escapes resolved.
    pub fn decoded_owner(&self) -> String {
        entities::decode(&self.owner)
    }
}

/// One row of the search table: a normalized key, a display label, and the
/// anchors of every declaration site sharing that label.
///
/// The table is immutable once loaded; the generator replaces it wholesale
/// on every documentation rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Normalized lowercase identifier with a numeric uniqueness suffix.
    pub key: String,

    /// Human-readable symbol name as shown in the documentation. May carry
    /// HTML entity escapes.
    pub label: String,

    /// Documentation anchors, one per overload/declaration site. Never
    /// empty in a well-formed table.
    pub targets: Vec<Anchor>,

    /// Shard category the entry was loaded from (functions, classes, ...).
    /// `None` for entries parsed outside a scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SymbolCategory>,
}

impl SearchEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, targets: Vec<Anchor>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            targets,
            category: None,
        }
    }

    /// Display label with HTML entity escapes resolved.
    pub fn decoded_label(&self) -> String {
        entities::decode(&self.label)
    }

    /// Key without its numeric uniqueness suffix. Falls back to the whole
    /// key when the suffix is missing.
    pub fn stem(&self) -> &str {
        key::split_key(&self.key).map(|(stem, _)| stem).unwrap_or(&self.key)
    }
}
