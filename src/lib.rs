// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod article;
pub mod config;
pub mod dedup;
pub mod extract;
pub mod geo;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod presentation;
pub mod query;
pub mod source;
pub mod tables;
pub mod topic;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::article::ArticleRecord;
pub use crate::pipeline::{run, PipelineOutput, PipelineStats};
pub use crate::query::{Category, Region, RelevanceQuery};
pub use crate::tables::RelevanceTables;
