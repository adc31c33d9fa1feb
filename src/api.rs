// src/api.rs
//! HTTP surface: `/health` and `/news`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::article::ArticleRecord;
use crate::metrics::record_pipeline;
use crate::pipeline;
use crate::presentation;
use crate::query::RelevanceQuery;
use crate::source::{prompt_for, HeadlineSource};
use crate::tables::RelevanceTables;

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<RelevanceTables>,
    pub source: Arc<dyn HeadlineSource>,
    pub headline_count: usize,
}

impl AppState {
    pub fn new(
        tables: Arc<RelevanceTables>,
        source: Arc<dyn HeadlineSource>,
        headline_count: usize,
    ) -> Self {
        Self {
            tables,
            source,
            headline_count,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/news", get(news))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    #[serde(default, alias = "country")]
    pub region: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub region: String,
    pub category: String,
    pub headlines: Vec<ArticleRecord>,
    pub fetched_at: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

async fn news(State(state): State<AppState>, Query(params): Query<NewsParams>) -> Response {
    counter!("news_requests_total").increment(1);

    let query = RelevanceQuery::from_params(
        params.region.as_deref(),
        params.category.as_deref(),
        &state.tables.params.wildcard_regions,
    );
    let prompt = prompt_for(&query, state.headline_count);

    let raw = match state.source.fetch_raw(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            counter!("news_source_errors_total").increment(1);
            tracing::warn!(error = ?e, source = state.source.name(), "headline source failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: "Could not fetch news.".to_string(),
                }),
            )
                .into_response();
        }
    };

    let out = pipeline::run(&raw, &query, &state.tables);
    record_pipeline(&out.stats);
    tracing::info!(
        target: "news",
        region = %query.region,
        category = %query.category,
        fragments = out.stats.fragments,
        duplicates = out.stats.duplicates,
        geo_dropped = out.stats.geo_dropped,
        topic_dropped = out.stats.topic_dropped,
        kept = out.stats.kept,
        empty_signal = out.stats.empty_signal,
        "news request served"
    );

    let headlines = presentation::finalize(out.records, &query, state.tables.params.min_headlines);
    Json(NewsResponse {
        region: query.region.to_string(),
        category: query.category.to_string(),
        headlines,
        fetched_at: chrono::Utc::now().to_rfc3339(),
    })
    .into_response()
}
