//! HTTP assistant client.
//!
//! `POST <url>` with `{"query": "..."}`, expects `{"answer": "..."}`.
//! A single attempt per question; no retries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Assistant, AssistantError};
use crate::config::AssistantConfig;

#[derive(Debug, Serialize)]
struct AssistantRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct AssistantReply {
    #[serde(default)]
    answer: Option<String>,
}

pub struct RemoteAssistant {
    http: Client,
    url: String,
    api_key: Option<SecretString>,
}

impl RemoteAssistant {
    pub fn new(config: &AssistantConfig, api_key: Option<SecretString>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build assistant HTTP client")?;

        Ok(Self {
            http,
            url: config.url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Assistant for RemoteAssistant {
    async fn ask(&self, query: &str) -> Result<Option<String>, AssistantError> {
        let mut req = self.http.post(&self.url).json(&AssistantRequest { query });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key.expose_secret());
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AssistantError::Request(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }

        let reply: AssistantReply = resp
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.without_url().to_string()))?;

        let answer = reply.answer.filter(|a| !a.trim().is_empty());
        debug!(answered = answer.is_some(), "Assistant replied");
        Ok(answer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
