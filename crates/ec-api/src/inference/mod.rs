//! Extraction provider chain for the server.
//!
//! Rule-based parsing always runs first. Ollama and Bedrock are appended as
//! fallbacks when enabled, in that order.

pub mod bedrock;

use std::sync::Arc;

use ec_intake::ExtractionEngine;
use ec_intake::inference::ollama::{OllamaConfig, OllamaExtractor};
use ec_intake::inference::rules::RuleBasedExtractor;
use ec_intake::inference::tiered::TieredExtractor;

pub use bedrock::{BedrockConfig, BedrockExtractor};

/// Build the provider chain.
pub fn build_extractor(
    ollama: &OllamaConfig,
    bedrock: Option<BedrockExtractor>,
) -> Arc<dyn ExtractionEngine> {
    let mut fallbacks: Vec<Box<dyn ExtractionEngine>> = Vec::new();
    if ollama.enabled {
        tracing::info!(host = %ollama.host, model = %ollama.model, "ollama extraction enabled");
        fallbacks.push(Box::new(OllamaExtractor::new(ollama.clone())));
    }
    if let Some(bedrock) = bedrock {
        tracing::info!("bedrock extraction enabled");
        fallbacks.push(Box::new(bedrock));
    }

    // Fold from the back so earlier providers are tried first.
    let fallback = fallbacks
        .into_iter()
        .rev()
        .reduce(|next, earlier| {
            Box::new(TieredExtractor::new(earlier, next)) as Box<dyn ExtractionEngine>
        });

    match fallback {
        Some(fallback) => Arc::new(TieredExtractor::new(
            Box::new(RuleBasedExtractor::new()),
            fallback,
        )),
        None => Arc::new(RuleBasedExtractor::new()),
    }
}
