//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search (cache vs network, errors, result counts)
//! - Cache writes
//! - Favorite toggles

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by answering source.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinescout_searches_total", "Total searches answered"),
        &["source"], // "cache", "network"
    )
    .unwrap()
});

/// Search errors total.
pub static SEARCH_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cinescout_search_errors_total",
        "Total failed catalog searches",
    )
    .unwrap()
});

/// Results returned per fetched page.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinescout_search_results",
            "Number of results returned per fetched page",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0, 100.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Cache writes total.
pub static CACHE_WRITES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cinescout_cache_writes_total",
        "Total search cache entries written",
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics
// =============================================================================

/// Favorite toggles total by action.
pub static FAVORITE_TOGGLES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinescout_favorite_toggles_total", "Total favorite toggles"),
        &["action"], // "added", "removed"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_ERRORS_TOTAL.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(CACHE_WRITES_TOTAL.clone()),
        Box::new(FAVORITE_TOGGLES_TOTAL.clone()),
    ]
}
