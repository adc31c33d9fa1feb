// src/source/http.rs
//! Headline tool exposed over HTTP: `GET <url>?prompt=...`, body is the raw blob.

use anyhow::{Context, Result};
use std::time::Duration;

use super::HeadlineSource;

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl HeadlineSource for HttpSource {
    async fn fetch_raw(&self, prompt: &str) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("prompt", prompt)])
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()
            .with_context(|| format!("GET {} status", self.url))?;
        resp.text().await.context("reading headline tool response")
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
