// src/article.rs
//! The structured output unit of the headline pipeline.

use serde::{Deserialize, Serialize};

/// One extracted headline.
///
/// Serializes as a flat mapping with every key present; absent fields are
/// written as `null` rather than omitted, so UI consumers can rely on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
    pub description: Option<String>,
}

impl ArticleRecord {
    /// Title-only record, used for informational notices shown in place of headlines.
    pub fn notice(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            source: None,
            author: None,
            published: None,
            description: None,
        }
    }
}
