//! Lookup over the loaded search table.

pub mod engine;
pub mod traits;

pub use engine::{IndexSearcher, QuerySpec};
pub use traits::Search;

use serde::Serialize;

use crate::scanner::SymbolCategory;

/// One row presented to a search consumer: an entry/target pair.
///
/// A label with several overloads produces one result per anchor, which is
/// what a search box shows.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Full key of the matched entry, suffix included
    pub key: String,
    /// Entity-decoded display label
    pub label: String,
    /// Relative link into the documentation pages
    pub href: String,
    /// Entity-decoded owner description
    pub owner: String,
    /// Shard category of the entry, when known
    pub category: Option<SymbolCategory>,
    /// Relevance score, higher is better
    pub score: f32,
}
