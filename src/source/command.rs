// src/source/command.rs
//! Runs the headline tool as a child process and reads its stdout.

use anyhow::{anyhow, Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::HeadlineSource;

// stderr excerpt length in error messages
const STDERR_SNIPPET: usize = 300;

pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSource {
    pub fn new(program: String, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl HeadlineSource for CommandSource {
    async fn fetch_raw(&self, prompt: &str) -> Result<String> {
        let t0 = std::time::Instant::now();
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let out = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| anyhow!("`{}` timed out after {:?}", self.program, self.timeout))?
            .with_context(|| format!("spawning `{}`", self.program))?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let snippet: String = stderr.chars().take(STDERR_SNIPPET).collect();
            return Err(anyhow!(
                "`{}` exited with {}: {}",
                self.program,
                out.status,
                snippet.trim()
            ));
        }

        tracing::debug!(
            target: "source",
            program = %self.program,
            bytes = out.stdout.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "command source finished"
        );
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
