// src/extract.rs
//! Field extraction: split a raw tool blob into fragments and pull labeled
//! fields out of each one.
//!
//! A field is the text after its label (`Title:`, `URL:`, ...) up to the end of
//! the line or the next known label, whichever comes first. Labels are matched
//! case-insensitively anywhere in the fragment and may be wrapped in markdown
//! emphasis (`**Title:**`). Every field is extracted independently; a missing
//! label yields `None`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::article::ArticleRecord;
use crate::tables::PipelineParams;

/// Labeled fields understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Source,
    Author,
    Published,
    Description,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Url,
        Field::Source,
        Field::Author,
        Field::Published,
        Field::Description,
    ];

    /// Accepted label spellings, lowercase.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["title", "headline"],
            Field::Url => &["url", "link"],
            Field::Source => &["source", "publisher"],
            Field::Author => &["author", "authors", "by"],
            Field::Published => &["published", "published at", "date"],
            Field::Description => &["description", "summary"],
        }
    }

    fn index(self) -> usize {
        match self {
            Field::Title => 0,
            Field::Url => 1,
            Field::Source => 2,
            Field::Author => 3,
            Field::Published => 4,
            Field::Description => 5,
        }
    }
}

// optional markdown emphasis around a label and its colon
const EMPH: &str = r"(?:\*\*|__)?";

fn label_alternation(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|l| regex::escape(l).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

fn label_marker(labels: &[&str]) -> String {
    format!(r"\b(?:{}){EMPH}\s*:{EMPH}", label_alternation(labels))
}

/// Regex source for one field: label, lazily captured value, then a stop at
/// end of line or at any known label.
fn field_pattern(field: Field) -> String {
    let any_label: Vec<&str> = Field::ALL
        .iter()
        .flat_map(|f| f.labels().iter().copied())
        .collect();
    format!(
        r"(?im){}[ \t]*(?P<v>.*?)(?:{}|$)",
        label_marker(field.labels()),
        label_marker(&any_label),
    )
}

static FIELD_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|f| Regex::new(&field_pattern(*f)).expect("field regex"))
        .collect()
});

static TITLE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?i){}", label_marker(Field::Title.labels()))).expect("title marker regex")
});

/// Split the raw blob on `delimiter`, in input order. An empty delimiter
/// yields the whole blob as a single fragment.
pub fn split_fragments<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![raw];
    }
    raw.split(delimiter).collect()
}

/// Does this fragment carry a title label at all? Fragments without one are noise.
pub fn has_title_marker(fragment: &str) -> bool {
    TITLE_MARKER.is_match(fragment)
}

/// Extract one field's trimmed value. Blank values count as absent.
pub fn extract_field(fragment: &str, field: Field) -> Option<String> {
    let caps = FIELD_RES[field.index()].captures(fragment)?;
    let v = caps.name("v")?.as_str().trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

pub fn extract_title(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Title)
}

pub fn extract_url(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Url)
}

pub fn extract_source(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Source)
}

pub fn extract_author(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Author)
}

pub fn extract_published(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Published)
}

pub fn extract_description(fragment: &str) -> Option<String> {
    extract_field(fragment, Field::Description)
}

fn is_placeholder(value: &str, placeholders: &[String]) -> bool {
    let v = value.trim().to_lowercase();
    v.is_empty() || placeholders.iter().any(|p| *p == v)
}

fn drop_placeholder(value: Option<String>, placeholders: &[String]) -> Option<String> {
    value.filter(|v| !is_placeholder(v, placeholders))
}

/// Build a record from one fragment, or `None` if it is not an article
/// (no title label, empty title, or placeholder title).
pub fn extract_record(fragment: &str, params: &PipelineParams) -> Option<ArticleRecord> {
    if !has_title_marker(fragment) {
        return None;
    }
    let title = extract_title(fragment)?;
    if is_placeholder(&title, &params.title_placeholders) {
        return None;
    }
    let ph = &params.value_placeholders;
    Some(ArticleRecord {
        title,
        url: drop_placeholder(extract_url(fragment), ph),
        source: drop_placeholder(extract_source(fragment), ph),
        author: drop_placeholder(extract_author(fragment), ph),
        published: drop_placeholder(extract_published(fragment), ph),
        description: drop_placeholder(extract_description(fragment), ph),
    })
}

/// An extracted record together with the fragment it came from; the
/// relevance filters read the full fragment text, not just the fields.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: ArticleRecord,
    pub fragment: &'a str,
}

/// Split and extract, keeping input order. Returns the candidates and the
/// number of fragments seen.
pub fn extract_candidates<'a>(raw: &'a str, params: &PipelineParams) -> (Vec<Candidate<'a>>, usize) {
    let fragments = split_fragments(raw, &params.delimiter);
    let total = fragments.len();
    let out = fragments
        .into_iter()
        .filter_map(|fragment| {
            extract_record(fragment, params).map(|record| Candidate { record, fragment })
        })
        .collect();
    (out, total)
}

/// Records only, for callers that do not filter.
pub fn extract_records(raw: &str, params: &PipelineParams) -> Vec<ArticleRecord> {
    extract_candidates(raw, params)
        .0
        .into_iter()
        .map(|c| c.record)
        .collect()
}
