//! Ollama local-model extraction.
//!
//! Calls the local Ollama HTTP API (`/api/chat`) with JSON output enabled
//! and reads the reply as an `ExtractionRecord`. Phrasings the rule-based
//! extractor cannot read usually land here.

use std::time::Duration;

use async_trait::async_trait;
use ec_protocol::{ExtractionContext, ExtractionRecord};
use serde::{Deserialize, Serialize};

use super::{
    ExtractionEngine, ExtractionResult, MIN_CONFIDENCE, SYSTEM_PROMPT, extract_json, user_prompt,
};

/// Configuration for the local Ollama endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_host")]
    pub host: String,
    /// Model to use for extraction.
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether the local model is consulted at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_host() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "phi3:mini".into()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_enabled() -> bool {
    true
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            enabled: default_enabled(),
        }
    }
}

/// `/api/chat` request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    format: &'a str,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// `/api/chat` reply. Only the message is read.
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Extraction provider backed by a local Ollama model.
pub struct OllamaExtractor {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaExtractor {
    pub fn new(config: OllamaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build ollama client, using defaults");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    async fn request(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionRecord> {
        let url = format!("{}/api/chat", self.config.host);
        let prompt = user_prompt(text, context);

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            format: "json",
            stream: false,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, host = %self.config.host, "ollama extraction unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ollama extraction rejected");
            return None;
        }

        let chat_resp: ChatResponse = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable ollama chat body");
                return None;
            }
        };

        let content = chat_resp.message?.content;

        let record: ExtractionRecord = match serde_json::from_str(extract_json(&content)) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, content = %content, "ollama reply is not an extraction record");
                return None;
            }
        };

        if record.confidence < MIN_CONFIDENCE {
            tracing::debug!(
                confidence = record.confidence,
                "ollama extraction below confidence floor"
            );
            return None;
        }

        Some(record)
    }
}

#[async_trait]
impl ExtractionEngine for OllamaExtractor {
    async fn extract(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionResult> {
        if !self.config.enabled {
            return None;
        }
        let mut record = self.request(text, context).await?;
        record.confidence = record.confidence.clamp(0.0, 1.0);
        Some(ExtractionResult {
            record,
            tier: "ollama".into(),
        })
    }

    fn tier_name(&self) -> &str {
        "ollama"
    }
}
