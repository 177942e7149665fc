use std::path::PathBuf;

use anyhow::Result;
use glob::Pattern;

use super::load_tree;
use crate::scanner::SymbolCategory;

/// Run the list command.
///
/// # Arguments
/// * `owner` - Glob pattern over owner descriptions
/// * `category` - Shard category filter
/// * `docs` - Optional explicit documentation tree path
pub async fn run(
    owner: Option<String>,
    category: Option<String>,
    docs: Option<PathBuf>,
) -> Result<()> {
    let (_resolved, outcome) = load_tree(docs.as_deref(), false)?;

    let owner_glob = match owner.as_deref() {
        Some(pattern) => Some(Pattern::new(pattern)?),
        None => None,
    };
    let category = match category.as_deref() {
        Some(raw) => Some(raw.parse::<SymbolCategory>()?),
        None => None,
    };

    let mut shown = 0;
    for entry in outcome.index.entries() {
        if let Some(wanted) = category {
            if entry.category != Some(wanted) {
                continue;
            }
        }
        if let Some(ref pattern) = owner_glob {
            if !entry
                .targets
                .iter()
                .any(|t| pattern.matches(&t.decoded_owner()))
            {
                continue;
            }
        }

        let anchors = entry.targets.len();
        let plural = if anchors == 1 { "anchor" } else { "anchors" };
        println!(
            "{:<40} {:<30} {} {}",
            entry.key,
            entry.decoded_label(),
            anchors,
            plural
        );
        shown += 1;
    }

    println!(
        "\n{} of {} entries shown",
        shown,
        outcome.index.len()
    );

    Ok(())
}
