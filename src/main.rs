//! Geophic News: Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use geophic_news::{
    api,
    config::AppConfig,
    logging::init_tracing,
    metrics::Metrics,
    source::build_source,
    tables::RelevanceTables,
};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let tables = RelevanceTables::from_env()?;
    let cfg = AppConfig::from_env()?;
    let source = build_source(&cfg)?;

    let state = api::AppState::new(Arc::new(tables), source, cfg.headline_count);
    let mut router = api::router(state);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
    }

    Ok(router.into())
}
