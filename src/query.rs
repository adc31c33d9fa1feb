// src/query.rs
//! Request context for the relevance filters: requested region and category.

use std::fmt;

/// Topical category. The fixed set mirrors the UI sidebar; anything else is
/// carried through as `Other` and never filtered (no keyword table entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Technology,
    Sports,
    Entertainment,
    Business,
    Politics,
    Health,
    Other(String),
}

impl Category {
    /// Parse a caller-supplied category. Input is trimmed and lowercased;
    /// empty input and the UI's "all news" label map to `General`.
    pub fn parse(raw: &str) -> Self {
        let norm = raw.trim().to_lowercase();
        match norm.as_str() {
            "" | "general" | "all" | "all news" => Self::General,
            "technology" | "tech" => Self::Technology,
            "sports" | "sport" => Self::Sports,
            "entertainment" => Self::Entertainment,
            "business" => Self::Business,
            "politics" => Self::Politics,
            "health" => Self::Health,
            _ => Self::Other(norm),
        }
    }

    /// Lowercase key used for keyword table lookups and responses.
    pub fn as_str(&self) -> &str {
        match self {
            Self::General => "general",
            Self::Technology => "technology",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Business => "business",
            Self::Politics => "politics",
            Self::Health => "health",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Self::General)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested region: either the wildcard (no geographic filtering) or a
/// named region kept in both display and lowercase forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Global,
    Named { label: String, key: String },
}

impl Region {
    /// Parse a caller-supplied region. `wildcards` lists the lowercase terms
    /// that mean "everywhere"; blank input is always the wildcard.
    pub fn parse<S: AsRef<str>>(raw: &str, wildcards: &[S]) -> Self {
        let label = raw.trim();
        let key = label.to_lowercase();
        if key.is_empty() || wildcards.iter().any(|w| w.as_ref() == key) {
            return Self::Global;
        }
        Self::Named {
            label: label.to_string(),
            key,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Lowercase lookup key; `None` for the wildcard.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Named { key, .. } => Some(key.as_str()),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("the world"),
            Self::Named { label, .. } => f.write_str(label),
        }
    }
}

/// Read-only request context, built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceQuery {
    pub region: Region,
    pub category: Category,
}

impl RelevanceQuery {
    pub fn new(region: Region, category: Category) -> Self {
        Self { region, category }
    }

    /// Build from raw request parameters. Missing values fall back to the
    /// wildcard region and the general category.
    pub fn from_params<S: AsRef<str>>(
        region: Option<&str>,
        category: Option<&str>,
        wildcards: &[S],
    ) -> Self {
        Self {
            region: Region::parse(region.unwrap_or_default(), wildcards),
            category: Category::parse(category.unwrap_or_default()),
        }
    }
}
