// HTTP client for the list/log server.
//
// The server exposes a small JSON API under a base path:
//   GET  {base}/lists — both word lists, `{"blacklist": [], "whitelist": []}`
//   POST {base}/lists — replace both word lists
//   POST {base}/log   — append one evaluation log entry
//   GET  {base}/log   — the evaluation report as plain text
//
// Missing list fields deserialize as empty, so a fresh server with no
// stored lists still pulls cleanly.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::engine::traits::Evaluation;
use crate::lists::WordLists;

/// One log entry as the server expects it.
#[derive(Serialize)]
struct LogEntry<'a> {
    text: &'a str,
    result: &'a Evaluation,
    mode: &'a str,
}

/// Client for the list/log server API.
pub struct ListServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ListServerClient {
    /// Create a new client pointing at the given base URL
    /// (e.g. `https://words.example.com/api`).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("wordgate/0.1 (content-moderation)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch both word lists from the server.
    pub async fn get_lists(&self) -> Result<WordLists> {
        let url = format!("{}/lists", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("List server request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("List server returned {}: {}", status, body);
        }

        let lists = response
            .json::<WordLists>()
            .await
            .context("Failed to parse list server response")?;

        debug!(
            blacklist = lists.blacklist().len(),
            whitelist = lists.whitelist().len(),
            "Fetched word lists from server"
        );

        Ok(lists)
    }

    /// Replace the server's word lists with the given ones.
    pub async fn put_lists(&self, lists: &WordLists) -> Result<()> {
        let url = format!("{}/lists", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(lists)
            .send()
            .await
            .context("List server request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("List server returned {}: {}", status, body);
        }

        Ok(())
    }

    /// Append one evaluation to the server's log.
    pub async fn post_log(&self, text: &str, mode: &str, result: &Evaluation) -> Result<()> {
        let url = format!("{}/log", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LogEntry { text, result, mode })
            .send()
            .await
            .context("Log server request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Log server returned {}: {}", status, body);
        }

        Ok(())
    }

    /// Fetch the server-side evaluation report as plain text.
    pub async fn fetch_report(&self) -> Result<String> {
        let url = format!("{}/log", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Log server request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Log server returned {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read log server report")
    }
}
