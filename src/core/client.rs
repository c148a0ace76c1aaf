use crate::utils::error::{ExpandError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const EXPAND_ENDPOINT: &str = "v3/expand";

/// The documented ceiling for hashes per v3/expand call.
pub const MAX_BATCH_SIZE: usize = 15;

/// Client for the bitly v3 expand endpoint. All calls are sequential; the
/// politeness delay is a plain blocking wait, not a backoff policy.
pub struct BitlyClient {
    http: Client,
    base_url: String,
    token: String,
    batch_size: usize,
    politeness: Duration,
}

#[derive(Debug, Deserialize)]
struct ExpandResponse {
    data: Option<ExpandData>,
}

#[derive(Debug, Deserialize)]
struct ExpandData {
    expand: Option<Vec<ExpandEntry>>,
}

#[derive(Debug, Deserialize)]
struct ExpandEntry {
    hash: Option<String>,
    long_url: Option<String>,
    error: Option<String>,
}

impl BitlyClient {
    pub fn new(base_url: &str, token: String, batch_size: usize, politeness: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            batch_size,
            politeness,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, EXPAND_ENDPOINT)
    }

    async fn pause(&self) {
        if !self.politeness.is_zero() {
            tokio::time::sleep(self.politeness).await;
        }
    }

    /// Expands a single hash via the plain-text response format.
    pub async fn expand_one(&self, hash: &str) -> Result<String> {
        tracing::debug!("Expanding hash {}", hash);
        let response = self
            .http
            .get(self.endpoint())
            .query(&[
                ("access_token", self.token.as_str()),
                ("format", "txt"),
                ("hash", hash),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExpandError::RemoteError {
                message: format!("expand of hash {} returned status {}", hash, status),
            });
        }

        Ok(response.text().await?.trim().to_string())
    }

    /// Per-identifier strategy: one request per hash, politeness delay before
    /// each call after the first. Output order equals input order.
    pub async fn expand_each(&self, hashes: &[String]) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(hashes.len());
        for (i, hash) in hashes.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }
            urls.push(self.expand_one(hash).await?);
        }
        Ok(urls)
    }

    /// Batched strategy: groups of `batch_size` hashes, one request per group
    /// with a leading politeness delay, flattened back in order.
    pub async fn expand_all(&self, hashes: &[String]) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(hashes.len());
        for batch in hashes.chunks(self.batch_size.max(1)) {
            self.pause().await;
            urls.extend(self.expand_batch(batch).await?);
        }
        Ok(urls)
    }

    async fn expand_batch(&self, hashes: &[String]) -> Result<Vec<String>> {
        tracing::debug!("Expanding batch of {} hashes", hashes.len());
        let mut params: Vec<(&str, &str)> = vec![("access_token", self.token.as_str())];
        for hash in hashes {
            params.push(("hash", hash.as_str()));
        }

        let response = self.http.get(self.endpoint()).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExpandError::RemoteError {
                message: format!("batch expand returned status {}", status),
            });
        }

        let body: ExpandResponse = response.json().await.map_err(|e| ExpandError::RemoteError {
            message: format!("batch expand returned an unreadable body: {}", e),
        })?;

        let entries = body
            .data
            .and_then(|d| d.expand)
            .ok_or_else(|| ExpandError::RemoteError {
                message: "batch expand response is missing data.expand".to_string(),
            })?;

        if entries.len() != hashes.len() {
            return Err(ExpandError::RemoteError {
                message: format!(
                    "batch expand returned {} results for {} hashes",
                    entries.len(),
                    hashes.len()
                ),
            });
        }

        entries
            .into_iter()
            .map(|entry| {
                entry.long_url.ok_or_else(|| ExpandError::RemoteError {
                    message: format!(
                        "no long_url for hash {} ({})",
                        entry.hash.as_deref().unwrap_or("?"),
                        entry.error.as_deref().unwrap_or("missing field")
                    ),
                })
            })
            .collect()
    }
}
