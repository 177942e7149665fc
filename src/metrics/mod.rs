//! Prometheus metrics for docdex.
//!
//! Observability for scans, lookups, and watch-mode reloads, exposed via
//! `docdex stats --prometheus` and the web server's `/metrics` endpoint.

use lazy_static::lazy_static;
use prometheus::{
    Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Search metrics

    /// Total number of search requests
    pub static ref SEARCH_REQUESTS: Counter = Counter::with_opts(
        Opts::new(
            "docdex_search_requests_total",
            "Total number of search requests"
        )
    ).expect("Failed to create SEARCH_REQUESTS counter");

    /// Search request latency in seconds
    pub static ref SEARCH_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "docdex_search_latency_seconds",
            "Search request latency in seconds"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])
    ).expect("Failed to create SEARCH_LATENCY histogram");

    /// Number of results returned per search request
    pub static ref SEARCH_RESULTS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "docdex_search_results_count",
            "Number of results returned per search request"
        ).buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0])
    ).expect("Failed to create SEARCH_RESULTS histogram");

    // Scan metrics

    /// Number of shards in the loaded table
    pub static ref LOADED_SHARDS: Gauge = Gauge::with_opts(
        Opts::new(
            "docdex_loaded_shards",
            "Number of shards in the loaded search table"
        )
    ).expect("Failed to create LOADED_SHARDS gauge");

    /// Number of entries in the loaded table
    pub static ref LOADED_ENTRIES: Gauge = Gauge::with_opts(
        Opts::new(
            "docdex_loaded_entries",
            "Number of entries in the loaded search table"
        )
    ).expect("Failed to create LOADED_ENTRIES gauge");

    /// Time to scan a documentation tree in seconds
    pub static ref SCAN_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "docdex_scan_duration_seconds",
            "Time to scan a documentation tree in seconds"
        ).buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0])
    ).expect("Failed to create SCAN_LATENCY histogram");

    /// Validation issues found by the most recent check
    pub static ref VALIDATION_ISSUES: Gauge = Gauge::with_opts(
        Opts::new(
            "docdex_validation_issues",
            "Validation issues found by the most recent check"
        )
    ).expect("Failed to create VALIDATION_ISSUES gauge");

    // Watch mode metrics

    /// Number of wholesale table reloads triggered by regeneration
    pub static ref REGENERATIONS_DETECTED: Counter = Counter::with_opts(
        Opts::new(
            "docdex_regenerations_detected_total",
            "Number of wholesale table reloads triggered by regeneration"
        )
    ).expect("Failed to create REGENERATIONS_DETECTED counter");
}

/// Register all metrics with the global registry.
///
/// Called once at application startup; panics if registration fails.
pub fn register_metrics() {
    REGISTRY
        .register(Box::new(SEARCH_REQUESTS.clone()))
        .expect("Failed to register SEARCH_REQUESTS");
    REGISTRY
        .register(Box::new(SEARCH_LATENCY.clone()))
        .expect("Failed to register SEARCH_LATENCY");
    REGISTRY
        .register(Box::new(SEARCH_RESULTS.clone()))
        .expect("Failed to register SEARCH_RESULTS");
    REGISTRY
        .register(Box::new(LOADED_SHARDS.clone()))
        .expect("Failed to register LOADED_SHARDS");
    REGISTRY
        .register(Box::new(LOADED_ENTRIES.clone()))
        .expect("Failed to register LOADED_ENTRIES");
    REGISTRY
        .register(Box::new(SCAN_LATENCY.clone()))
        .expect("Failed to register SCAN_LATENCY");
    REGISTRY
        .register(Box::new(VALIDATION_ISSUES.clone()))
        .expect("Failed to register VALIDATION_ISSUES");
    REGISTRY
        .register(Box::new(REGENERATIONS_DETECTED.clone()))
        .expect("Failed to register REGENERATIONS_DETECTED");
}

/// Gather all metrics in Prometheus text exposition format.
///
/// Returns an empty string if encoding fails (which should not happen with
/// valid metrics).
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}

/// Current metric values in a human-readable form, for the stats command.
pub struct MetricSnapshot {
    pub search_requests_total: f64,
    pub search_latency_avg: f64,
    pub search_results_avg: f64,
    pub loaded_shards: f64,
    pub loaded_entries: f64,
    pub regenerations_total: f64,
}

impl MetricSnapshot {
    /// Capture the current state of all metrics.
    pub fn capture() -> Self {
        Self {
            search_requests_total: SEARCH_REQUESTS.get(),
            search_latency_avg: calculate_histogram_avg(&SEARCH_LATENCY),
            search_results_avg: calculate_histogram_avg(&SEARCH_RESULTS),
            loaded_shards: LOADED_SHARDS.get(),
            loaded_entries: LOADED_ENTRIES.get(),
            regenerations_total: REGENERATIONS_DETECTED.get(),
        }
    }
}

fn calculate_histogram_avg(histogram: &Histogram) -> f64 {
    let count = histogram.get_sample_count();
    if count == 0 {
        return 0.0;
    }
    histogram.get_sample_sum() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_increment() {
        let initial = SEARCH_REQUESTS.get();
        SEARCH_REQUESTS.inc();
        assert!((SEARCH_REQUESTS.get() - initial - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gauge_set() {
        LOADED_ENTRIES.set(42.0);
        assert!((LOADED_ENTRIES.get() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_histogram_observe() {
        let count_before = SEARCH_LATENCY.get_sample_count();
        SEARCH_LATENCY.observe(0.001);
        assert_eq!(SEARCH_LATENCY.get_sample_count(), count_before + 1);
    }

    #[test]
    fn test_gather_metrics() {
        let output = gather_metrics();
        // Empty when nothing is registered yet; prefixed otherwise.
        assert!(output.is_empty() || output.contains("docdex"));
    }

    #[test]
    fn test_metric_snapshot() {
        let snapshot = MetricSnapshot::capture();
        assert!(snapshot.search_requests_total >= 0.0);
        assert!(snapshot.loaded_entries >= 0.0);
    }
}
