//! Stats command for displaying index statistics and metrics.

use std::path::PathBuf;

use anyhow::Result;

use super::load_tree;
use crate::metrics::{gather_metrics, MetricSnapshot};

/// Run the stats command.
///
/// # Arguments
/// * `prometheus` - If true, output in Prometheus text format
/// * `docs` - Optional explicit documentation tree path
pub async fn run(prometheus: bool, docs: Option<PathBuf>) -> Result<()> {
    // The scan itself updates the loaded_* gauges.
    let (resolved, outcome) = load_tree(docs.as_deref(), false)?;

    if prometheus {
        print!("{}", gather_metrics());
        return Ok(());
    }

    let snapshot = MetricSnapshot::capture();

    println!("docdex Index Statistics");
    println!("=======================\n");

    println!("Documentation tree: {}", resolved.docs_root.display());
    println!();

    println!("Table Contents:");
    println!("  Shards:  {}", outcome.report.shards_loaded);
    println!("  Entries: {}", outcome.index.len());
    println!("  Anchors: {}", outcome.index.target_count());
    println!("  Owners:  {}", outcome.index.owners().len());
    println!();

    let by_category = outcome.index.category_counts();
    if !by_category.is_empty() {
        println!("Entries by category:");
        for (category, count) in by_category {
            println!("  {:<14} {}", category, count);
        }
        println!();
    }

    println!("Search Metrics:");
    println!("  Total requests:   {:.0}", snapshot.search_requests_total);
    if snapshot.search_requests_total > 0.0 {
        println!("  Average latency:  {:.4}s", snapshot.search_latency_avg);
        println!("  Average results:  {:.1}", snapshot.search_results_avg);
    }

    if snapshot.regenerations_total > 0.0 {
        println!();
        println!("Watch Metrics:");
        println!("  Reloads: {:.0}", snapshot.regenerations_total);
    }

    if outcome.report.errors.has_errors() {
        println!();
        outcome.report.errors.print_summary();
    }

    Ok(())
}
