// src/metrics.rs
use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::pipeline::PipelineStats;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Fails if another recorder is already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_requests_total", "Requests served by /news.");
        describe_counter!(
            "news_source_errors_total",
            "Upstream headline tool failures."
        );
        describe_counter!("pipeline_fragments_total", "Fragments split from raw blobs.");
        describe_counter!(
            "pipeline_duplicates_total",
            "Records removed by URL deduplication."
        );
        describe_counter!(
            "pipeline_geo_dropped_total",
            "Records dropped by the geographic filter."
        );
        describe_counter!(
            "pipeline_topic_dropped_total",
            "Records dropped by the topical filter."
        );
        describe_counter!("pipeline_kept_total", "Records that passed every stage.");
        describe_counter!(
            "pipeline_empty_signal_total",
            "Raw blobs that explicitly reported no results."
        );
    });
}

/// Record one pipeline run. A no-op when no recorder is installed.
pub fn record_pipeline(stats: &PipelineStats) {
    counter!("pipeline_fragments_total").increment(stats.fragments as u64);
    counter!("pipeline_duplicates_total").increment(stats.duplicates as u64);
    counter!("pipeline_geo_dropped_total").increment(stats.geo_dropped as u64);
    counter!("pipeline_topic_dropped_total").increment(stats.topic_dropped as u64);
    counter!("pipeline_kept_total").increment(stats.kept as u64);
    if stats.empty_signal {
        counter!("pipeline_empty_signal_total").increment(1);
    }
}
