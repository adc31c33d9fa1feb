// src/source/mod.rs
//! Upstream headline tools. A source turns a natural-language prompt into the
//! raw, loosely delimited text blob the pipeline parses.

pub mod command;
pub mod fixture;
pub mod http;

use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, SourceKind};
use crate::query::RelevanceQuery;

pub use command::CommandSource;
pub use fixture::FixtureSource;
pub use http::HttpSource;

#[async_trait::async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_raw(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Prompt sent upstream, e.g.
/// `What are the 4 latest sports news headlines about India without summary?`
pub fn prompt_for(query: &RelevanceQuery, count: usize) -> String {
    let category = if query.category.is_general() {
        String::new()
    } else {
        format!("{} ", query.category)
    };
    format!(
        "What are the {count} latest {category}news headlines about {} without summary?",
        query.region
    )
}

/// Construct the configured source.
pub fn build_source(cfg: &AppConfig) -> Result<Arc<dyn HeadlineSource>> {
    let src: Arc<dyn HeadlineSource> = match &cfg.source {
        SourceKind::Fixture { path } => Arc::new(FixtureSource::from_path(path)?),
        SourceKind::Command { program, args } => Arc::new(CommandSource::new(
            program.clone(),
            args.clone(),
            cfg.source_timeout,
        )),
        SourceKind::Http { url } => Arc::new(HttpSource::new(url.clone(), cfg.source_timeout)?),
    };
    tracing::info!(source = src.name(), "headline source ready");
    Ok(src)
}
