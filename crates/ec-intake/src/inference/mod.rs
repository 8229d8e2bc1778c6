//! Natural-language extraction.
//!
//! Converts free text ("a 3-day festival for 5,000 people, 30-foot vinyl
//! backdrop") into a structured `ExtractionRecord` with event facts,
//! quantity/unit/item tuples and a confidence.
//!
//! Providers:
//! - **Rule-based** (local): regex and keyword matching, no network.
//! - **Ollama** (local model): `/api/chat` with JSON output.
//! - **Tiered**: local first, then a fallback provider.
//!
//! Every provider answers `None` when it has nothing usable. Callers impose
//! the timeout and treat expiry exactly like `None`.

pub mod ollama;
pub mod rules;
pub mod tiered;

use std::time::Duration;

use async_trait::async_trait;
use ec_protocol::{ExtractionContext, ExtractionRecord};
use tokio::time::timeout;

/// Providers below this confidence are treated as "no match".
pub const MIN_CONFIDENCE: f64 = 0.3;

/// Extraction result tagged with the provider tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub record: ExtractionRecord,
    pub tier: String,
}

/// Capability that turns free text into an `ExtractionRecord`.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Extract structured data from text, using `context` to disambiguate.
    /// Returns None if the provider is unavailable or found nothing.
    async fn extract(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionResult>;

    /// Name of this provider tier (for logging/audit).
    fn tier_name(&self) -> &str;
}

/// Run an extraction under a deadline. Expiry degrades to `None`.
pub async fn extract_with_timeout(
    engine: &dyn ExtractionEngine,
    text: &str,
    context: &ExtractionContext,
    limit: Duration,
) -> Option<ExtractionResult> {
    match timeout(limit, engine.extract(text, context)).await {
        Ok(Some(result)) if result.record.is_empty() => {
            tracing::debug!(tier = %result.tier, "extraction returned an empty record");
            None
        }
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                tier = engine.tier_name(),
                timeout_ms = limit.as_millis() as u64,
                "extraction timed out"
            );
            None
        }
    }
}

/// Extract JSON from model output that may be wrapped in markdown code blocks.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    trimmed
}

/// Shared instructions for model-backed providers.
pub const SYSTEM_PROMPT: &str = r#"You extract event logistics from free text for a carbon footprint calculator.

Respond with ONLY a JSON object (no markdown, no explanation) of this shape:
{
  "facts": {
    "event_type": "concert|festival|conference|sports_event|theater|wedding|corporate_event|trade_show|community_event|outdoor_event|other",
    "attendance": <int>, "days": <int>, "hours_per_day": <number>,
    "venue_type": "<string>", "is_outdoor": <bool>,
    "power_source": "grid|generator|hybrid|renewable",
    "stages": <int>, "av_scale": "small|medium|large|festival",
    "meals_served": <int>, "locally_sourced": <bool>,
    "crew_size": <int>, "crew_method": "car|public_transit|flight|train|bus|mixed", "crew_distance_km": <number>,
    "trucks": <int>, "equipment_distance_km": <number>,
    "audience_distance_km": <number>, "audience_mode": "car|public_transit|flight|train|bus|mixed",
    "recycling_program": <bool>, "waste_measures": ["composting", ...]
  },
  "items": [
    {"item": "<what>", "quantity": <number>, "unit": "<unit as written>", "material": "<material or fuel>",
     "count": <number>, "duration_hours": <number>, "distance": <number>, "distance_unit": "<unit>"}
  ],
  "sustainable_choices": ["<phrase>", ...],
  "confidence": <0.0-1.0>
}

Omit every field the text does not state. Never guess numbers.
"items" lists physical materials, fuel, vehicles, meals or waste with a stated quantity.
If nothing relevant is stated, respond with {"confidence": 0.0}."#;

/// Render the user message sent to model-backed providers.
pub fn user_prompt(text: &str, context: &ExtractionContext) -> String {
    let context_json = serde_json::to_string(context).unwrap_or_else(|_| "{}".into());
    format!("Known context: {context_json}\n\nText: {text}")
}
