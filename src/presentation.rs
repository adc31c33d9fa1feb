// src/presentation.rs
//! Caller-facing notices layered on top of pipeline output. The pipeline itself
//! never fabricates records; the API does, through here.

use crate::article::ArticleRecord;
use crate::query::RelevanceQuery;

fn category_phrase(query: &RelevanceQuery) -> String {
    if query.category.is_general() {
        String::new()
    } else {
        format!("{} ", query.category)
    }
}

/// Notice shown when nothing passed filtering.
pub fn empty_notice(query: &RelevanceQuery) -> ArticleRecord {
    ArticleRecord::notice(format!(
        "No {}news found for {}.",
        category_phrase(query),
        query.region
    ))
}

/// Notice appended when a specific category came back thin.
pub fn sparse_notice(query: &RelevanceQuery, found: usize) -> ArticleRecord {
    let noun = if found == 1 { "headline" } else { "headlines" };
    ArticleRecord::notice(format!(
        "Only {found} {}{noun} found for {}.",
        category_phrase(query),
        query.region
    ))
}

/// Apply display notices:
/// - no records → a single "no news" notice
/// - non-general category with fewer than `min_headlines` → records plus a trailing notice
/// - otherwise unchanged
pub fn finalize(
    mut records: Vec<ArticleRecord>,
    query: &RelevanceQuery,
    min_headlines: usize,
) -> Vec<ArticleRecord> {
    if records.is_empty() {
        return vec![empty_notice(query)];
    }
    if !query.category.is_general() && records.len() < min_headlines {
        let n = records.len();
        records.push(sparse_notice(query, n));
    }
    records
}
