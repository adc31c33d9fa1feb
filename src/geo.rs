// src/geo.rs
//! Geographic relevance: does an article plausibly concern the requested region?
//!
//! Matching is deliberately permissive. The upstream search is already biased
//! toward the region; this filter only catches off-region leakage.
//!
//! 1. Wildcard region → keep
//! 2. Region is a canonical alias-table key → keep if the canonical name or
//!    any alias appears as a substring of title + description + fragment
//! 3. Anything else, including a bare alias such as "Delhi" → keep if the
//!    requested term itself appears as a substring
//! 4. Sports only: no mention, but a matchup indicator ("vs", "against", ...)
//!    is present → keep (fixtures often headline the opponent)
//! 5. Otherwise drop

use crate::article::ArticleRecord;
use crate::query::{Category, Region};
use crate::tables::{AliasTable, Term};

/// Outcome of the geographic check, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoVerdict {
    Wildcard,
    AliasMatch,
    DirectMatch,
    MatchupRelaxed,
    Reject,
}

impl GeoVerdict {
    pub fn keep(self) -> bool {
        !matches!(self, GeoVerdict::Reject)
    }
}

/// Lowercase title + description + full fragment text.
pub fn combined_text(record: &ArticleRecord, fragment: &str) -> String {
    let mut s = String::with_capacity(
        record.title.len() + record.description.as_deref().map_or(0, str::len) + fragment.len() + 2,
    );
    s.push_str(&record.title);
    s.push('\n');
    if let Some(d) = &record.description {
        s.push_str(d);
    }
    s.push('\n');
    s.push_str(fragment);
    s.to_lowercase()
}

/// Decide keep/drop for one record.
pub fn geo_check(
    record: &ArticleRecord,
    fragment: &str,
    region: &Region,
    category: &Category,
    aliases: &AliasTable,
    matchup_terms: &[Term],
) -> GeoVerdict {
    let key = match region.key() {
        None => return GeoVerdict::Wildcard,
        Some(k) => k,
    };
    let text = combined_text(record, fragment);

    if let Some(entry) = aliases.resolve(key) {
        if entry.mentioned_in(&text) {
            return GeoVerdict::AliasMatch;
        }
    } else if text.contains(key) {
        return GeoVerdict::DirectMatch;
    }

    if *category == Category::Sports && matchup_terms.iter().any(|t| t.is_present(&text)) {
        return GeoVerdict::MatchupRelaxed;
    }

    GeoVerdict::Reject
}
