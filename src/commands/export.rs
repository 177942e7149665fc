//! Export command: serialize the merged table as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::load_tree;

/// Run the export command.
///
/// # Arguments
/// * `output` - Destination file; stdout when absent
/// * `pretty` - Pretty-print the JSON
/// * `docs` - Optional explicit documentation tree path
pub async fn run(output: Option<PathBuf>, pretty: bool, docs: Option<PathBuf>) -> Result<()> {
    let (_resolved, outcome) = load_tree(docs.as_deref(), false)?;

    let entries = outcome.index.entries();
    let json = if pretty {
        serde_json::to_string_pretty(entries).context("Failed to serialize table")?
    } else {
        serde_json::to_string(entries).context("Failed to serialize table")?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write export to {:?}", path))?;
            println!("Exported {} entries to {}", entries.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
