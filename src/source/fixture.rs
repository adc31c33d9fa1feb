// src/source/fixture.rs
use anyhow::{Context, Result};
use std::path::Path;

use super::HeadlineSource;

/// Returns the same text for every prompt.
pub struct FixtureSource {
    text: String,
}

impl FixtureSource {
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading headline fixture from {}", path.display()))?;
        Ok(Self { text })
    }
}

#[async_trait::async_trait]
impl HeadlineSource for FixtureSource {
    async fn fetch_raw(&self, _prompt: &str) -> Result<String> {
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
