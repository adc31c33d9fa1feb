// src/config.rs
//! Service configuration from the environment (`.env` is loaded in main).

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_SOURCE: &str = "GEOPHIC_SOURCE";
pub const ENV_SOURCE_CMD: &str = "GEOPHIC_SOURCE_CMD";
pub const ENV_SOURCE_URL: &str = "GEOPHIC_SOURCE_URL";
pub const ENV_FIXTURE_PATH: &str = "GEOPHIC_FIXTURE_PATH";
pub const ENV_HEADLINE_COUNT: &str = "GEOPHIC_HEADLINE_COUNT";
pub const ENV_SOURCE_TIMEOUT_SECS: &str = "GEOPHIC_SOURCE_TIMEOUT_SECS";

pub const DEFAULT_SOURCE_CMD: &str = "python -m google_news_trends_mcp";
pub const DEFAULT_FIXTURE_PATH: &str = "config/sample_headlines.txt";
pub const DEFAULT_HEADLINE_COUNT: usize = 4;
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

/// Where raw headline text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Fixed text read from a file (local dev, demos, tests).
    Fixture { path: PathBuf },
    /// External tool process; the prompt is passed as the last argument.
    Command { program: String, args: Vec<String> },
    /// HTTP endpoint; the prompt is sent as the `prompt` query parameter.
    Http { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: SourceKind,
    /// How many headlines to ask the upstream tool for.
    pub headline_count: usize,
    pub source_timeout: Duration,
}

fn parse_positive<T: std::str::FromStr + PartialOrd + Default>(raw: Option<String>) -> Option<T> {
    raw.and_then(|s| s.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = get(ENV_SOURCE)
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "command".to_string());

        let source = match kind.as_str() {
            "fixture" => SourceKind::Fixture {
                path: get(ENV_FIXTURE_PATH)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_PATH)),
            },
            "command" => {
                let line = get(ENV_SOURCE_CMD).unwrap_or_else(|| DEFAULT_SOURCE_CMD.to_string());
                let mut parts = line.split_whitespace().map(str::to_string);
                let program = parts
                    .next()
                    .ok_or_else(|| anyhow!("{ENV_SOURCE_CMD} is empty"))?;
                SourceKind::Command {
                    program,
                    args: parts.collect(),
                }
            }
            "http" => {
                let url = get(ENV_SOURCE_URL)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| anyhow!("{ENV_SOURCE}=http requires {ENV_SOURCE_URL}"))?;
                SourceKind::Http { url }
            }
            other => return Err(anyhow!("unsupported {ENV_SOURCE} `{other}`")),
        };

        Ok(Self {
            source,
            headline_count: parse_positive(get(ENV_HEADLINE_COUNT)).unwrap_or(DEFAULT_HEADLINE_COUNT),
            source_timeout: Duration::from_secs(
                parse_positive(get(ENV_SOURCE_TIMEOUT_SECS)).unwrap_or(DEFAULT_SOURCE_TIMEOUT_SECS),
            ),
        })
    }
}
