// src/dedup.rs
//! Single-pass URL deduplication. First occurrence wins; records without a
//! URL have no identity and are always kept.

use std::collections::HashSet;

use crate::article::ArticleRecord;
use crate::extract::Candidate;

/// Keep the first item for each identity key, preserving order.
/// Returns (kept, removed_count).
pub fn dedup_by_key<T, F>(items: Vec<T>, key: F) -> (Vec<T>, usize)
where
    F: Fn(&T) -> Option<&str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(items.len());
    let mut removed = 0usize;

    for it in items {
        if let Some(k) = key(&it).map(str::trim).filter(|k| !k.is_empty()) {
            if !seen.insert(k.to_string()) {
                removed += 1;
                continue;
            }
        }
        keep.push(it);
    }
    (keep, removed)
}

pub fn dedup_records(records: Vec<ArticleRecord>) -> (Vec<ArticleRecord>, usize) {
    dedup_by_key(records, |r| r.url.as_deref())
}

pub fn dedup_candidates(cands: Vec<Candidate<'_>>) -> (Vec<Candidate<'_>>, usize) {
    dedup_by_key(cands, |c| c.record.url.as_deref())
}
