//! Shard category classification.
//!
//! The generator splits the search table into shards named
//! `<category>_<bucket>.js` (for example `functions_8.js` or
//! `enumvalues_b.js`) under the documentation tree's `search/` directory.
//! The category tells consumers what kind of symbol an entry describes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbol categories the generator shards its table by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    All,
    Classes,
    Defines,
    Enums,
    EnumValues,
    Events,
    Files,
    Functions,
    Groups,
    Namespaces,
    Pages,
    Properties,
    Related,
    Typedefs,
    Variables,
}

impl SymbolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolCategory::All => "all",
            SymbolCategory::Classes => "classes",
            SymbolCategory::Defines => "defines",
            SymbolCategory::Enums => "enums",
            SymbolCategory::EnumValues => "enumvalues",
            SymbolCategory::Events => "events",
            SymbolCategory::Files => "files",
            SymbolCategory::Functions => "functions",
            SymbolCategory::Groups => "groups",
            SymbolCategory::Namespaces => "namespaces",
            SymbolCategory::Pages => "pages",
            SymbolCategory::Properties => "properties",
            SymbolCategory::Related => "related",
            SymbolCategory::Typedefs => "typedefs",
            SymbolCategory::Variables => "variables",
        }
    }

    /// Classify a shard file stem such as `functions_8` or `enumvalues_b`.
    ///
    /// The part after the final underscore is the generator's bucket id
    /// (hex digits); anything else is not a shard.
    pub fn from_shard_stem(stem: &str) -> Option<Self> {
        let (prefix, bucket) = stem.rsplit_once('_')?;
        if bucket.is_empty() || !bucket.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        prefix.parse().ok()
    }
}

impl FromStr for SymbolCategory {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "all" => Ok(SymbolCategory::All),
            "classes" => Ok(SymbolCategory::Classes),
            "defines" => Ok(SymbolCategory::Defines),
            "enums" => Ok(SymbolCategory::Enums),
            "enumvalues" => Ok(SymbolCategory::EnumValues),
            "events" => Ok(SymbolCategory::Events),
            "files" => Ok(SymbolCategory::Files),
            "functions" => Ok(SymbolCategory::Functions),
            "groups" => Ok(SymbolCategory::Groups),
            "namespaces" => Ok(SymbolCategory::Namespaces),
            "pages" => Ok(SymbolCategory::Pages),
            "properties" => Ok(SymbolCategory::Properties),
            "related" => Ok(SymbolCategory::Related),
            "typedefs" => Ok(SymbolCategory::Typedefs),
            "variables" => Ok(SymbolCategory::Variables),
            other => anyhow::bail!("unknown symbol category `{}`", other),
        }
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
