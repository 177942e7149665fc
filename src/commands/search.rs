use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::load_tree;
use crate::config::SearchMode;
use crate::index;
use crate::search::{IndexSearcher, QuerySpec};

/// Run the search command.
///
/// # Arguments
/// * `query` - The typed symbol name or fragment
/// * `limit` - Maximum number of results to return
/// * `mode` - Matching strategy override
/// * `owner` - Glob pattern over owner descriptions
/// * `docs` - Optional explicit documentation tree path
pub async fn run(
    query: &str,
    limit: Option<usize>,
    mode: Option<String>,
    owner: Option<String>,
    docs: Option<PathBuf>,
) -> Result<()> {
    let (resolved, outcome) = load_tree(docs.as_deref(), false)?;

    let mode = match mode.as_deref() {
        Some(raw) => Some(raw.parse::<SearchMode>()?),
        None => None,
    };

    let searcher = Arc::new(IndexSearcher::new(
        index::shared(outcome.index),
        resolved.config.search.clone(),
    ));

    let spec = QuerySpec {
        text: query.to_string(),
        mode,
        limit,
        owner_pattern: owner,
        category: None,
    };
    let results = searcher.query(&spec).await?;

    if results.is_empty() {
        println!("No results found for: {}", query);
        println!("\nTry a different mode with --mode substring or --mode fuzzy");
        return Ok(());
    }

    println!("Found {} results for: \"{}\"\n", results.len(), query);

    for (i, result) in results.iter().enumerate() {
        let score_pct = (result.score * 100.0).round() as i32;

        match result.category {
            Some(category) => println!(
                "{}. {} [{}] (score: {}%)",
                i + 1,
                result.label,
                category,
                score_pct
            ),
            None => println!("{}. {} (score: {}%)", i + 1, result.label, score_pct),
        }

        if !result.owner.is_empty() {
            println!("   {}", result.owner);
        }
        println!("   {}", result.href);
        println!();
    }

    Ok(())
}
