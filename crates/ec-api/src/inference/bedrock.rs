//! AWS Bedrock extraction provider using the Converse API.
//!
//! Handles the descriptions the local providers can't read. The Converse
//! API is model-agnostic (Nova Lite, Claude, etc.).

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use std::time::Duration;
use tokio::time::timeout;

use ec_intake::inference::{
    ExtractionEngine, ExtractionResult, MIN_CONFIDENCE, SYSTEM_PROMPT, extract_json, user_prompt,
};
use ec_protocol::{ExtractionContext, ExtractionRecord};

/// Configuration for the Bedrock extraction provider.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Bedrock model ID (e.g., "us.amazon.nova-lite-v1:0").
    pub model_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BedrockConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let model_id =
            std::env::var("BEDROCK_MODEL_ID").unwrap_or_else(|_| "us.amazon.nova-lite-v1:0".into());
        let timeout_secs: u64 = std::env::var("BEDROCK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        Self {
            model_id,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Bedrock Converse API extraction provider.
pub struct BedrockExtractor {
    client: BedrockClient,
    config: BedrockConfig,
}

impl BedrockExtractor {
    /// Create a provider with a pre-built Bedrock client.
    pub fn new(client: BedrockClient, config: BedrockConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ExtractionEngine for BedrockExtractor {
    async fn extract(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionResult> {
        let result = timeout(self.config.timeout, self.call_converse(text, context)).await;

        match result {
            Ok(Ok(Some(record))) => Some(ExtractionResult {
                record,
                tier: "bedrock".into(),
            }),
            Ok(Ok(None)) => {
                tracing::debug!("bedrock returned nothing usable");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "bedrock extraction failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.timeout.as_secs(),
                    "bedrock extraction timed out"
                );
                None
            }
        }
    }

    fn tier_name(&self) -> &str {
        "bedrock"
    }
}

impl BedrockExtractor {
    /// Call the Bedrock Converse API and parse the response.
    async fn call_converse(
        &self,
        text: &str,
        context: &ExtractionContext,
    ) -> anyhow::Result<Option<ExtractionRecord>> {
        let user_message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_prompt(text, context)))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build message: {e}"))?;

        let response = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(user_message)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("bedrock converse error: {e}"))?;

        let output = response
            .output()
            .ok_or_else(|| anyhow::anyhow!("no output in bedrock response"))?;

        let text_content = match output {
            aws_sdk_bedrockruntime::types::ConverseOutput::Message(msg) => {
                msg.content().iter().find_map(|block| {
                    if let ContentBlock::Text(t) = block {
                        Some(t.clone())
                    } else {
                        None
                    }
                })
            }
            _ => None,
        };

        let Some(raw_text) = text_content else {
            return Ok(None);
        };

        parse_record(&raw_text)
    }
}

/// Parse model output into a record, discarding low-confidence answers.
fn parse_record(raw_text: &str) -> anyhow::Result<Option<ExtractionRecord>> {
    let mut record: ExtractionRecord = serde_json::from_str(extract_json(raw_text))
        .map_err(|e| anyhow::anyhow!("failed to parse bedrock JSON: {e} (raw: {raw_text})"))?;

    if record.confidence < MIN_CONFIDENCE {
        tracing::debug!(
            confidence = record.confidence,
            "bedrock confidence too low, discarding"
        );
        return Ok(None);
    }

    record.confidence = record.confidence.min(1.0);
    Ok(Some(record))
}
