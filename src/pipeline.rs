// src/pipeline.rs
//! Orchestrator: raw blob → fragments → records → dedup → geo → topic.
//!
//! Every stage only removes records; order is preserved end to end. The run is
//! synchronous and reads nothing but its arguments and the shared tables.

use serde::Serialize;
use tracing::debug;

use crate::article::ArticleRecord;
use crate::dedup::dedup_candidates;
use crate::extract::{extract_candidates, Candidate};
use crate::geo::geo_check;
use crate::logging::{anon_hash, dev_logging_enabled};
use crate::query::RelevanceQuery;
use crate::tables::{PipelineParams, RelevanceTables};
use crate::topic::topic_check;

/// Per-run counters, reported by the service layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub fragments: usize,
    pub extracted: usize,
    pub duplicates: usize,
    pub geo_dropped: usize,
    pub topic_dropped: usize,
    pub kept: usize,
    pub empty_signal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub records: Vec<ArticleRecord>,
    pub stats: PipelineStats,
}

/// Does the blob explicitly say there is nothing to extract?
/// Only the lead-in before the first delimiter is checked, so an article
/// quoting "no results found" does not wipe out its siblings.
pub fn is_empty_signal(raw: &str, params: &PipelineParams) -> bool {
    let lead = match params.delimiter.as_str() {
        "" => raw,
        d => raw.split(d).next().unwrap_or(raw),
    };
    let lower = lead.to_lowercase();
    params.empty_phrases.iter().any(|p| lower.contains(p.as_str()))
}

fn dev_log_drop(stage: &str, c: &Candidate<'_>, detail: &str) {
    if !dev_logging_enabled() {
        return;
    }
    // never log raw titles
    debug!(target: "pipeline", stage, id = %anon_hash(&c.record.title), detail, "record dropped");
}

/// Run the full pipeline over one raw blob.
pub fn run(raw: &str, query: &RelevanceQuery, tables: &RelevanceTables) -> PipelineOutput {
    let params = &tables.params;
    let mut stats = PipelineStats::default();

    if is_empty_signal(raw, params) {
        stats.empty_signal = true;
        return PipelineOutput {
            records: Vec::new(),
            stats,
        };
    }

    // 1) Extract
    let (candidates, fragments) = extract_candidates(raw, params);
    stats.fragments = fragments;
    stats.extracted = candidates.len();

    // 2) Deduplicate
    let (candidates, duplicates) = dedup_candidates(candidates);
    stats.duplicates = duplicates;

    // 3) Geographic filter
    let candidates: Vec<Candidate<'_>> = candidates
        .into_iter()
        .filter(|c| {
            let v = geo_check(
                &c.record,
                c.fragment,
                &query.region,
                &query.category,
                &tables.aliases,
                &params.matchup_terms,
            );
            if !v.keep() {
                stats.geo_dropped += 1;
                dev_log_drop("geo", c, &format!("{v:?}"));
            }
            v.keep()
        })
        .collect();

    // 4) Topical filter
    let records: Vec<ArticleRecord> = candidates
        .into_iter()
        .filter(|c| {
            let v = topic_check(
                &c.record,
                c.fragment,
                &query.category,
                &tables.keywords,
                params.min_exclusion_hits,
            );
            if !v.keep() {
                stats.topic_dropped += 1;
                dev_log_drop("topic", c, &format!("{v:?}"));
            }
            v.keep()
        })
        .map(|c| c.record)
        .collect();

    stats.kept = records.len();
    PipelineOutput { records, stats }
}

/// Records only.
pub fn run_records(raw: &str, query: &RelevanceQuery, tables: &RelevanceTables) -> Vec<ArticleRecord> {
    run(raw, query, tables).records
}
