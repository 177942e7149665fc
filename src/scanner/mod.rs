//! Loading a documentation tree's search index shards.
//!
//! A scan discovers every shard under the tree, parses them in parallel,
//! and merges the results into one [`SearchIndex`] in stable path order.
//! Shard failures are collected instead of aborting the scan; a corrupt
//! bucket should not hide the rest of the table.

pub mod category;
pub mod report;
pub mod walker;

pub use category::SymbolCategory;
pub use report::{ErrorCollector, ScanErrorReport, ScanStage, ShardError};
pub use walker::Walker;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ScannerConfig;
use crate::index::{SearchEntry, SearchIndex};
use crate::metrics;
use crate::script;

/// Summary of a completed scan.
#[derive(Debug)]
pub struct ScanReport {
    pub shards_found: usize,
    pub shards_loaded: usize,
    pub entries_loaded: usize,
    pub targets_loaded: usize,
    pub duration_secs: f64,
    pub errors: ScanErrorReport,
}

impl ScanReport {
    /// Print the scan outcome in the CLI's usual format.
    pub fn print_summary(&self) {
        println!(
            "Loaded {} entries ({} anchors) from {}/{} shards in {:.2}s",
            self.entries_loaded,
            self.targets_loaded,
            self.shards_loaded,
            self.shards_found,
            self.duration_secs
        );
        if self.errors.has_errors() {
            println!();
            self.errors.print_summary();
        }
    }
}

/// Outcome of a scan: the merged table plus its report.
pub struct ScanOutcome {
    pub index: SearchIndex,
    pub report: ScanReport,
}

/// Parses and merges every shard under a documentation tree.
pub struct Scanner {
    root: PathBuf,
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, config: ScannerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Scan without progress output (servers, tests).
    pub fn scan(&self) -> Result<ScanOutcome> {
        self.scan_with_progress(false)
    }

    /// Scan the tree, optionally drawing a progress bar.
    pub fn scan_with_progress(&self, progress: bool) -> Result<ScanOutcome> {
        let started = Instant::now();

        let walker = Walker::new(self.root.clone(), &self.config);
        let shards = walker.collect_shards();
        let shards_found = shards.len();
        info!("Found {} index shards under {:?}", shards_found, self.root);

        let collector = ErrorCollector::new(self.config.max_shard_errors);

        let bar = if progress {
            let bar = ProgressBar::new(shards_found as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} shards")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let threads = self.config.parallel_threads.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build scanner thread pool")?;

        let parsed: Vec<(PathBuf, Option<Vec<SearchEntry>>)> = pool.install(|| {
            shards
                .par_iter()
                .map(|path| {
                    let entries = if collector.should_continue() {
                        match parse_shard(path) {
                            Ok(entries) => Some(entries),
                            Err((stage, error)) => {
                                collector.record(path.clone(), error, stage);
                                None
                            }
                        }
                    } else {
                        None
                    };
                    bar.inc(1);
                    (path.clone(), entries)
                })
                .collect()
        });
        bar.finish_and_clear();

        // Merge in path order so the table layout is deterministic.
        let mut index = SearchIndex::new();
        let mut shards_loaded = 0;
        for (path, entries) in parsed {
            let Some(entries) = entries else { continue };
            shards_loaded += 1;

            let category = shard_category(&path);
            for mut entry in entries {
                entry.category = category;
                if let Err(duplicate) = index.insert(entry) {
                    collector.record(path.clone(), duplicate.into(), ScanStage::Merge);
                }
            }
        }

        let duration_secs = started.elapsed().as_secs_f64();
        metrics::LOADED_SHARDS.set(shards_loaded as f64);
        metrics::LOADED_ENTRIES.set(index.len() as f64);
        metrics::SCAN_LATENCY.observe(duration_secs);

        debug!(
            "Scan of {:?} finished: {} entries, {} errors",
            self.root,
            index.len(),
            collector.error_count()
        );

        let report = ScanReport {
            shards_found,
            shards_loaded,
            entries_loaded: index.len(),
            targets_loaded: index.target_count(),
            duration_secs,
            errors: collector.report(),
        };

        Ok(ScanOutcome { index, report })
    }
}

/// Category of a shard, derived from its file name.
pub fn shard_category(path: &Path) -> Option<SymbolCategory> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(SymbolCategory::from_shard_stem)
}

fn parse_shard(path: &Path) -> std::result::Result<Vec<SearchEntry>, (ScanStage, anyhow::Error)> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        (
            ScanStage::Read,
            anyhow::Error::from(e).context(format!("Failed to read shard {:?}", path)),
        )
    })?;

    script::parse(&source).map_err(|e| (ScanStage::Parse, e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_shard_category() {
        assert_eq!(
            shard_category(Path::new("docs/search/functions_8.js")),
            Some(SymbolCategory::Functions)
        );
        assert_eq!(shard_category(Path::new("docs/search/search.js")), None);
    }

    #[test]
    fn test_scan_merges_and_tags() {
        let dir = tempdir().unwrap();
        let search_dir = dir.path().join("search");
        fs::create_dir_all(&search_dir).unwrap();

        fs::write(
            search_dir.join("functions_0.js"),
            "var searchData=\n[\n  ['render_0',['Render',['../classCanvas.html#a1',1,'Canvas']]]\n];\n",
        )
        .unwrap();
        fs::write(
            search_dir.join("classes_0.js"),
            "var searchData=\n[\n  ['canvas_1',['Canvas',['../classCanvas.html',1,'']]]\n];\n",
        )
        .unwrap();

        let scanner = Scanner::new(dir.path(), ScannerConfig::default());
        let outcome = scanner.scan().unwrap();

        assert_eq!(outcome.report.shards_found, 2);
        assert_eq!(outcome.report.shards_loaded, 2);
        assert_eq!(outcome.index.len(), 2);
        assert!(!outcome.report.errors.has_errors());

        let entry = outcome.index.get("render_0").unwrap();
        assert_eq!(entry.category, Some(SymbolCategory::Functions));
    }

    #[test]
    fn test_scan_survives_corrupt_shard() {
        let dir = tempdir().unwrap();
        let search_dir = dir.path().join("search");
        fs::create_dir_all(&search_dir).unwrap();

        fs::write(search_dir.join("functions_0.js"), "not a shard at all").unwrap();
        fs::write(
            search_dir.join("classes_0.js"),
            "var searchData=\n[\n  ['canvas_1',['Canvas',['../classCanvas.html',1,'']]]\n];\n",
        )
        .unwrap();

        let scanner = Scanner::new(dir.path(), ScannerConfig::default());
        let outcome = scanner.scan().unwrap();

        assert_eq!(outcome.report.shards_found, 2);
        assert_eq!(outcome.report.shards_loaded, 1);
        assert_eq!(outcome.index.len(), 1);
        assert_eq!(outcome.report.errors.total_errors, 1);
    }
}
