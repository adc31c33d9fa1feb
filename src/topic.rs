// src/topic.rs
//! Topical relevance: positive keyword evidence weighed against cross-category
//! exclusion evidence.
//!
//! Policy is recall-first. A record is dropped only when it has no supporting
//! term at all AND at least `min_exclusion_hits` exclusion terms. General and
//! unknown categories are never filtered.

use crate::article::ArticleRecord;
use crate::geo::combined_text;
use crate::query::Category;
use crate::tables::KeywordTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicVerdict {
    /// General category, no topical filtering.
    Unfiltered,
    /// Category has no keyword table entry; fail open.
    UnknownCategory,
    /// Kept after weighing evidence.
    Kept { positive: usize, negative: usize },
    /// Zero support with strong counter-evidence.
    Excluded { negative: usize },
}

impl TopicVerdict {
    pub fn keep(self) -> bool {
        !matches!(self, TopicVerdict::Excluded { .. })
    }
}

/// The drop rule on its own, so the threshold can be exercised directly.
pub fn should_exclude(positive: usize, negative: usize, min_exclusion_hits: usize) -> bool {
    positive == 0 && negative >= min_exclusion_hits
}

/// Decide keep/drop for one record.
pub fn topic_check(
    record: &ArticleRecord,
    fragment: &str,
    category: &Category,
    keywords: &KeywordTable,
    min_exclusion_hits: usize,
) -> TopicVerdict {
    if category.is_general() {
        return TopicVerdict::Unfiltered;
    }
    let Some(terms) = keywords.get(category.as_str()) else {
        return TopicVerdict::UnknownCategory;
    };

    let text = combined_text(record, fragment);
    let (positive, negative) = terms.evidence(&text);
    if should_exclude(positive, negative, min_exclusion_hits) {
        TopicVerdict::Excluded { negative }
    } else {
        TopicVerdict::Kept { positive, negative }
    }
}
