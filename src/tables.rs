// src/tables.rs
//! Relevance tables: TOML schema, term compilation, and the read-only
//! alias/keyword lookups shared by every pipeline run.

use anyhow::{anyhow, Context};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_TABLES_PATH: &str = "config/tables.toml";

pub const ENV_TABLES_PATH: &str = "GEOPHIC_TABLES_PATH";
pub const ENV_MIN_EXCLUSION_HITS: &str = "GEOPHIC_MIN_EXCLUSION_HITS";
pub const ENV_MIN_HEADLINES: &str = "GEOPHIC_MIN_HEADLINES";

/// The shipped tables, compiled into the binary as the last-resort default.
const BUILTIN_TABLES: &str = include_str!("../config/tables.toml");

// parse optional count env; garbage is ignored
fn parse_count_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablesRoot {
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryCfg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicySection {
    pub delimiter: String,
    pub min_exclusion_hits: usize,
    pub min_headlines: usize,
    pub empty_phrases: Vec<String>,
    pub wildcard_regions: Vec<String>,
    pub matchup_terms: Vec<String>,
    pub title_placeholders: Vec<String>,
    pub value_placeholders: Vec<String>,
}

impl Default for PolicySection {
    fn default() -> Self {
        fn strings(v: &[&str]) -> Vec<String> {
            v.iter().map(|s| s.to_string()).collect()
        }
        Self {
            delimiter: "---".into(),
            min_exclusion_hits: 3,
            min_headlines: 3,
            empty_phrases: strings(&["no articles found", "no results found", "no news found"]),
            wildcard_regions: strings(&["global"]),
            matchup_terms: strings(&["vs", "versus", "against", "match", "plays"]),
            title_placeholders: strings(&["no title"]),
            value_placeholders: strings(&["none", "n/a"]),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryCfg {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/* ----------------------------
Compiled structures
---------------------------- */

/// Regex source for a table term: whole word or phrase, case-insensitive,
/// tolerating a trailing plural `s`/`es` on terms ending in a word character.
pub fn term_pattern(term: &str) -> String {
    let starts_word = term.chars().next().is_some_and(|c| c.is_alphanumeric());
    let ends_word = term.chars().last().is_some_and(|c| c.is_alphanumeric());
    let mut pat = String::from("(?i)");
    if starts_word {
        pat.push_str(r"\b");
    }
    pat.push_str(&regex::escape(term));
    if ends_word {
        pat.push_str(r"(?:s|es)?\b");
    }
    pat
}

/// One lowercase table term and its compiled matcher.
#[derive(Debug, Clone)]
pub struct Term {
    text: String,
    re: Regex,
}

impl Term {
    pub fn compile(raw: &str) -> anyhow::Result<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Err(anyhow!("empty term"));
        }
        let re = Regex::new(&term_pattern(&text))
            .with_context(|| format!("term `{text}` regex error"))?;
        Ok(Self { text, re })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_present(&self, haystack: &str) -> bool {
        self.re.is_match(haystack)
    }
}

fn compile_terms(raw: &[String], what: &str) -> anyhow::Result<Vec<Term>> {
    raw.iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| Term::compile(t).with_context(|| format!("in {what}")))
        .collect()
}

fn lowercase_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Canonical region name plus every surface form that counts as a mention.
#[derive(Debug, Clone)]
pub struct RegionEntry {
    pub canonical: String,
    /// Lowercase canonical name first, then aliases.
    pub terms: Vec<String>,
}

impl RegionEntry {
    /// Plain substring test; `haystack` must already be lowercase.
    /// Catches compound mentions such as `timesofindia` in a URL.
    pub fn mentioned_in(&self, haystack: &str) -> bool {
        self.terms.iter().any(|t| haystack.contains(t.as_str()))
    }
}

/// Canonical region → alternate surface forms (demonyms, cities, colloquialisms).
/// Lookups go by canonical name only; aliases widen what counts as a mention.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<RegionEntry>,
    // canonical key → entry index
    index: HashMap<String, usize>,
}

impl AliasTable {
    pub fn from_map(map: &BTreeMap<String, Vec<String>>) -> Self {
        let mut table = Self::default();
        for (canonical, aliases) in map {
            let canonical = canonical.trim().to_lowercase();
            if canonical.is_empty() {
                continue;
            }
            if table.index.contains_key(&canonical) {
                warn!(region = %canonical, "region declared twice; keeping first");
                continue;
            }
            let mut terms = vec![canonical.clone()];
            for alias in lowercase_list(aliases) {
                if !terms.contains(&alias) {
                    terms.push(alias);
                }
            }
            table.index.insert(canonical.clone(), table.entries.len());
            table.entries.push(RegionEntry { canonical, terms });
        }
        table
    }

    /// Look a requested region up by canonical name.
    pub fn resolve(&self, key: &str) -> Option<&RegionEntry> {
        self.index
            .get(key.trim().to_lowercase().as_str())
            .map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Positive indicator terms and cross-category exclusion terms for one category.
#[derive(Debug, Clone, Default)]
pub struct CategoryTerms {
    pub positive: Vec<Term>,
    pub negative: Vec<Term>,
}

impl CategoryTerms {
    /// Count distinct positive and negative terms present in `haystack`.
    pub fn evidence(&self, haystack: &str) -> (usize, usize) {
        let pos = self.positive.iter().filter(|t| t.is_present(haystack)).count();
        let neg = self.negative.iter().filter(|t| t.is_present(haystack)).count();
        (pos, neg)
    }
}

/// Category → keyword evidence terms.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    categories: HashMap<String, CategoryTerms>,
}

impl KeywordTable {
    pub fn from_map(map: &BTreeMap<String, CategoryCfg>) -> anyhow::Result<Self> {
        let mut categories = HashMap::with_capacity(map.len());
        for (name, cfg) in map {
            let key = name.trim().to_lowercase();
            let terms = CategoryTerms {
                positive: compile_terms(&cfg.positive, &format!("category `{key}` positive"))?,
                negative: compile_terms(&cfg.negative, &format!("category `{key}` negative"))?,
            };
            categories.insert(key, terms);
        }
        Ok(Self { categories })
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTerms> {
        self.categories.get(category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Heuristic constants and phrase lists, all overridable from TOML.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub delimiter: String,
    pub min_exclusion_hits: usize,
    pub min_headlines: usize,
    pub empty_phrases: Vec<String>,
    pub wildcard_regions: Vec<String>,
    pub matchup_terms: Vec<Term>,
    pub title_placeholders: Vec<String>,
    pub value_placeholders: Vec<String>,
}

impl PipelineParams {
    pub fn from_section(p: &PolicySection) -> anyhow::Result<Self> {
        Ok(Self {
            delimiter: p.delimiter.clone(),
            min_exclusion_hits: p.min_exclusion_hits,
            min_headlines: p.min_headlines,
            empty_phrases: lowercase_list(&p.empty_phrases),
            wildcard_regions: lowercase_list(&p.wildcard_regions),
            matchup_terms: compile_terms(&p.matchup_terms, "policy.matchup_terms")?,
            title_placeholders: lowercase_list(&p.title_placeholders),
            value_placeholders: lowercase_list(&p.value_placeholders),
        })
    }
}

/// Everything the pipeline reads, compiled once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct RelevanceTables {
    pub params: PipelineParams,
    pub aliases: AliasTable,
    pub keywords: KeywordTable,
}

impl RelevanceTables {
    /// Load tables for the running process:
    /// 1) $GEOPHIC_TABLES_PATH (must exist when set)
    /// 2) config/tables.toml
    /// 3) the built-in copy
    ///
    /// Count overrides from the environment are applied last.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut tables = if let Ok(p) = std::env::var(ENV_TABLES_PATH) {
            let path = PathBuf::from(p);
            if !path.exists() {
                return Err(anyhow!(
                    "{ENV_TABLES_PATH} points to non-existent path {}",
                    path.display()
                ));
            }
            Self::from_path(&path)?
        } else if Path::new(DEFAULT_TABLES_PATH).exists() {
            Self::from_path(Path::new(DEFAULT_TABLES_PATH))?
        } else {
            Self::builtin()?
        };

        if let Some(n) = parse_count_env(std::env::var(ENV_MIN_EXCLUSION_HITS).ok()) {
            tables.params.min_exclusion_hits = n;
        }
        if let Some(n) = parse_count_env(std::env::var(ENV_MIN_HEADLINES).ok()) {
            tables.params.min_headlines = n;
        }

        info!(
            regions = tables.aliases.len(),
            categories = tables.keywords.len(),
            min_exclusion_hits = tables.params.min_exclusion_hits,
            min_headlines = tables.params.min_headlines,
            "relevance tables loaded"
        );
        Ok(tables)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading relevance tables from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("loading relevance tables from {}", path.display()))
    }

    /// The tables shipped with the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_toml_str(BUILTIN_TABLES).context("built-in relevance tables")
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let root: TablesRoot = toml::from_str(toml_str)?;
        Self::compile(&root)
    }

    pub fn compile(root: &TablesRoot) -> anyhow::Result<Self> {
        Ok(Self {
            params: PipelineParams::from_section(&root.policy)?,
            aliases: AliasTable::from_map(&root.aliases),
            keywords: KeywordTable::from_map(&root.categories)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOML: &str = r#"
[policy]
delimiter = "==="
min_exclusion_hits = 2

[aliases]
"United States" = ["USA", "u.s.", "American"]
"india" = ["indian", "american"]

[categories.Sports]
positive = ["cricket", "match"]
negative = ["stock", "earnings", " "]
"#;

    #[test]
    fn term_matches_whole_words_and_plurals() {
        let t = Term::compile("Stock").unwrap();
        assert_eq!(t.text(), "stock");
        assert!(t.is_present("stocks rally"));
        assert!(t.is_present("A STOCK fell"));
        assert!(!t.is_present("stockholm summit"));

        let ai = Term::compile("ai").unwrap();
        assert!(ai.is_present("new AI chip"));
        assert!(!ai.is_present("he said so"));

        let us = Term::compile("u.s.").unwrap();
        assert!(us.is_present("the u.s. economy"));
    }

    #[test]
    fn policy_defaults_fill_missing_keys() {
        let t = RelevanceTables::from_toml_str(TEST_TOML).unwrap();
        assert_eq!(t.params.delimiter, "===");
        assert_eq!(t.params.min_exclusion_hits, 2);
        assert_eq!(t.params.min_headlines, 3);
        assert!(t.params.wildcard_regions.iter().any(|w| w == "global"));
    }

    #[test]
    fn aliases_resolve_by_canonical_name_only() {
        let t = RelevanceTables::from_toml_str(TEST_TOML).unwrap();
        let us = t.aliases.resolve(" United States ").expect("canonical lookup");
        assert_eq!(us.canonical, "united states");
        assert_eq!(us.terms, ["united states", "usa", "u.s.", "american"]);
        assert!(t.aliases.resolve("atlantis").is_none());
        // an alias is a surface form, not a region of its own
        assert!(t.aliases.resolve("USA").is_none());
        assert!(t.aliases.resolve("indian").is_none());
        // two regions may share a surface form
        assert!(t.aliases.resolve("india").unwrap().terms.iter().any(|a| a == "american"));
    }

    #[test]
    fn region_mentions_are_substrings() {
        let t = RelevanceTables::from_toml_str(TEST_TOML).unwrap();
        let india = t.aliases.resolve("india").unwrap();
        assert!(india.mentioned_in("https://timesofindia.indiatimes.com/city/x"));
        assert!(india.mentioned_in("indians celebrate"));
        assert!(!india.mentioned_in("rains lash the coast"));
    }

    #[test]
    fn keyword_keys_are_lowercased_and_blank_terms_skipped() {
        let t = RelevanceTables::from_toml_str(TEST_TOML).unwrap();
        let sports = t.keywords.get("sports").expect("sports entry");
        assert_eq!(sports.positive.len(), 2);
        assert_eq!(sports.negative.len(), 2);
        assert_eq!(sports.evidence("Stocks and earnings fall"), (0, 2));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(RelevanceTables::from_toml_str("[policy\nbroken").is_err());
    }

    #[test]
    fn builtin_tables_compile() {
        let t = RelevanceTables::builtin().expect("builtin tables");
        assert!(t.aliases.resolve("india").is_some());
        assert!(t.keywords.get("sports").is_some());
        assert_eq!(t.params.min_exclusion_hits, 3);
    }
}
