//! Client for an Ollama-compatible text-generation service

use crate::config::ExplainerConfig;
use crate::error::{HoopcastError, Result};
use crate::explain::TextGenerator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// `POST /api/generate` request body
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Non-streaming `/api/generate` response; only `response` is used
#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    total_duration: Option<u64>,
}

pub struct OllamaClient {
    endpoint: Url,
    model: String,
    http: Client,
}

impl OllamaClient {
    pub fn new(config: &ExplainerConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            HoopcastError::InvalidConfig(format!("explainer.base_url: {}", e))
        })?;
        let endpoint = base
            .join("api/generate")
            .map_err(|e| HoopcastError::InvalidConfig(format!("explainer.base_url: {}", e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HoopcastError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            model: config.model.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Requesting explanation");
        let response = self.http.post(self.endpoint.clone()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, "Text generation service returned an error: {}", text);
            return Err(HoopcastError::Explainer(format!(
                "text generation service returned {}",
                status
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        if let Some(ns) = parsed.total_duration {
            debug!(generation_ms = ns / 1_000_000, "Explanation generated");
        }
        Ok(parsed.response)
    }
}
