//! Prometheus metrics for the analytics service.
//!
//! [`AnalyticsMetrics`] owns a dedicated [`Registry`] that the HTTP
//! `/metrics` endpoint encodes into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry, Encoder, Histogram,
    HistogramOpts, IntCounter, Opts, Registry, TextEncoder,
};
use tracing::warn;

/// Central collection of all service-level Prometheus metrics.
pub struct AnalyticsMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    pub cache_hits: IntCounter,
    pub cache_misses: IntCounter,
    /// Cache reads or writes that failed and were swallowed.
    pub cache_errors: IntCounter,
    /// Edge-source calls: one per track snapshot, one per (paged) bulk listing.
    pub indexer_fetches: IntCounter,
    pub indexer_fetch_failures: IntCounter,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time spent aggregating or summarising a fetched edge set.
    pub aggregation_duration_ms: Histogram,
}

impl AnalyticsMetrics {
    /// Create a fresh set of metrics, all registered under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let cache_hits = register_int_counter_with_registry!(
            Opts::new("conviction_cache_hits_total", "Analytics cache hits"),
            registry
        )
        .expect("failed to register cache_hits counter");

        let cache_misses = register_int_counter_with_registry!(
            Opts::new("conviction_cache_misses_total", "Analytics cache misses"),
            registry
        )
        .expect("failed to register cache_misses counter");

        let cache_errors = register_int_counter_with_registry!(
            Opts::new(
                "conviction_cache_errors_total",
                "Analytics cache reads and writes that failed"
            ),
            registry
        )
        .expect("failed to register cache_errors counter");

        let indexer_fetches = register_int_counter_with_registry!(
            Opts::new(
                "conviction_indexer_fetches_total",
                "Edge-source fetches; a paged bulk listing counts once"
            ),
            registry
        )
        .expect("failed to register indexer_fetches counter");

        let indexer_fetch_failures = register_int_counter_with_registry!(
            Opts::new(
                "conviction_indexer_fetch_failures_total",
                "Edge-source fetches that failed"
            ),
            registry
        )
        .expect("failed to register indexer_fetch_failures counter");

        // Exponential buckets covering 0.1 ms → ~1.6 s.
        let aggregation_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "conviction_aggregation_duration_ms",
                "Edge aggregation time in milliseconds"
            )
            .buckets(
                prometheus::exponential_buckets(0.1, 2.0, 15)
                    .expect("static bucket layout is valid")
            ),
            registry
        )
        .expect("failed to register aggregation_duration_ms histogram");

        Self {
            registry,
            cache_hits,
            cache_misses,
            cache_errors,
            indexer_fetches,
            indexer_fetch_failures,
            aggregation_duration_ms,
        }
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            warn!(error = %e, "failed to encode metrics");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for AnalyticsMetrics {
    fn default() -> Self {
        Self::new()
    }
}
