//! Fmt command: rewrite index shards in the canonical layout.
//!
//! Each shard is parsed and re-emitted independently so entry order and
//! shard boundaries are preserved exactly; only whitespace and escaping
//! are normalized.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use super::resolve_tree;
use crate::scanner::Walker;
use crate::script;

/// Run the fmt command.
///
/// # Arguments
/// * `check` - Verify shards are canonical without rewriting them
/// * `docs` - Optional explicit documentation tree path
pub async fn run(check: bool, docs: Option<PathBuf>) -> Result<()> {
    let resolved = resolve_tree(docs.as_deref())?;

    let walker = Walker::new(resolved.docs_root.clone(), &resolved.config.scanner);
    let shards = walker.collect_shards();

    if shards.is_empty() {
        bail!("No index shards found under {:?}", resolved.docs_root);
    }

    let mut canonical = 0;
    let mut rewritten: Vec<PathBuf> = Vec::new();

    for path in &shards {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read shard {:?}", path))?;
        let entries = script::parse(&source)
            .with_context(|| format!("Failed to parse shard {:?}", path))?;

        let rendered = script::write_table(&entries);
        if rendered == source {
            canonical += 1;
            continue;
        }

        if !check {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to rewrite shard {:?}", path))?;
        }
        rewritten.push(path.clone());
    }

    if check {
        if rewritten.is_empty() {
            println!("All {} shards are canonical", shards.len());
            return Ok(());
        }

        println!("{} of {} shards are not canonical:", rewritten.len(), shards.len());
        for path in &rewritten {
            println!("  {}", path.display());
        }
        bail!("{} shards need rewriting", rewritten.len());
    }

    println!(
        "Rewrote {} shards ({} already canonical)",
        rewritten.len(),
        canonical
    );

    Ok(())
}
