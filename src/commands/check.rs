//! Check command: scan a tree and verify every table invariant.

use std::path::PathBuf;

use anyhow::{bail, Result};

use super::load_tree;
use crate::metrics;
use crate::validate;

/// Run the check command.
///
/// # Arguments
/// * `docs` - Optional explicit documentation tree path
/// * `strict` - Fail the command when validation issues are found
pub async fn run(docs: Option<PathBuf>, strict: bool) -> Result<()> {
    let (_resolved, outcome) = load_tree(docs.as_deref(), true)?;

    outcome.report.print_summary();
    println!();

    let report = validate::validate_entries(outcome.index.entries());
    metrics::VALIDATION_ISSUES.set(report.issue_count() as f64);
    report.print_summary();

    if outcome.report.errors.has_errors() {
        bail!(
            "{} shards failed to load",
            outcome.report.errors.total_errors
        );
    }

    if strict && !report.is_clean() {
        bail!("{} validation issues found", report.issue_count());
    }

    Ok(())
}
