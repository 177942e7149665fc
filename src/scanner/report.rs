//! Error collection and reporting for multi-shard scans.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Stage where a shard failed during a scan.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ScanStage {
    Read,
    Parse,
    Merge,
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStage::Read => write!(f, "Read"),
            ScanStage::Parse => write!(f, "Parse"),
            ScanStage::Merge => write!(f, "Merge"),
        }
    }
}

/// Error raised while processing one shard.
#[derive(Debug, Clone)]
pub struct ShardError {
    pub path: PathBuf,
    pub error: String,
    pub stage: ScanStage,
}

/// Collects shard errors across parallel parser workers.
#[derive(Clone)]
pub struct ErrorCollector {
    errors: Arc<Mutex<Vec<ShardError>>>,
    max_errors: usize,
}

impl ErrorCollector {
    /// Create a collector that tolerates at most `max_errors` failures.
    pub fn new(max_errors: usize) -> Self {
        Self {
            errors: Arc::new(Mutex::new(Vec::new())),
            max_errors,
        }
    }

    /// Record a shard failure.
    pub fn record(&self, path: PathBuf, error: anyhow::Error, stage: ScanStage) {
        let mut errors = self.errors.lock().unwrap();
        errors.push(ShardError {
            path,
            error: error.to_string(),
            stage,
        });
    }

    /// Whether the scan should keep going given the error count so far.
    pub fn should_continue(&self) -> bool {
        self.errors.lock().unwrap().len() < self.max_errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    /// Snapshot the collected errors into a report.
    pub fn report(&self) -> ScanErrorReport {
        let errors = self.errors.lock().unwrap();
        ScanErrorReport::from_errors(&errors)
    }
}

/// Grouped shard errors with a printable summary.
#[derive(Debug)]
pub struct ScanErrorReport {
    pub total_errors: usize,
    pub by_stage: HashMap<ScanStage, Vec<ShardError>>,
    pub summary: String,
}

impl ScanErrorReport {
    pub fn from_errors(errors: &[ShardError]) -> Self {
        let mut by_stage: HashMap<ScanStage, Vec<ShardError>> = HashMap::new();
        for error in errors {
            by_stage.entry(error.stage).or_default().push(error.clone());
        }

        let summary = if errors.is_empty() {
            "All shards loaded cleanly".to_string()
        } else {
            format!("Scan completed with {} shard errors", errors.len())
        };

        Self {
            total_errors: errors.len(),
            by_stage,
            summary,
        }
    }

    /// Print a grouped summary with a few examples per stage.
    pub fn print_summary(&self) {
        if self.total_errors == 0 {
            return;
        }

        println!("⚠️  {}", self.summary);
        println!();

        for (stage, errors) in &self.by_stage {
            println!("  {}: {} errors", stage, errors.len());

            for error in errors.iter().take(5) {
                println!("    - {}: {}", error.path.display(), error.error);
            }

            if errors.len() > 5 {
                println!("    ... and {} more", errors.len() - 5);
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_records_and_reports() {
        let collector = ErrorCollector::new(3);
        assert!(collector.should_continue());

        collector.record(
            PathBuf::from("search/functions_0.js"),
            anyhow::anyhow!("broken"),
            ScanStage::Parse,
        );
        collector.record(
            PathBuf::from("search/classes_0.js"),
            anyhow::anyhow!("unreadable"),
            ScanStage::Read,
        );

        assert_eq!(collector.error_count(), 2);
        assert!(collector.should_continue());

        let report = collector.report();
        assert_eq!(report.total_errors, 2);
        assert!(report.has_errors());
        assert_eq!(report.by_stage[&ScanStage::Parse].len(), 1);
    }

    #[test]
    fn test_collector_stops_at_threshold() {
        let collector = ErrorCollector::new(1);
        collector.record(
            PathBuf::from("search/all_0.js"),
            anyhow::anyhow!("broken"),
            ScanStage::Parse,
        );
        assert!(!collector.should_continue());
    }

    #[test]
    fn test_empty_report() {
        let report = ScanErrorReport::from_errors(&[]);
        assert!(!report.has_errors());
        assert_eq!(report.summary, "All shards loaded cleanly");
    }
}
