//! Tiered extraction: local-first with a fallback provider.
//!
//! Tries the local (rule-based) extractor first. If it returns `None`,
//! falls back to the next provider. The tier that produced the result is
//! recorded in `ExtractionResult.tier`.

use async_trait::async_trait;
use ec_protocol::ExtractionContext;

use super::{ExtractionEngine, ExtractionResult};

/// Composite engine that tries local extraction first, then a fallback.
pub struct TieredExtractor {
    local: Box<dyn ExtractionEngine>,
    fallback: Box<dyn ExtractionEngine>,
}

impl TieredExtractor {
    pub fn new(local: Box<dyn ExtractionEngine>, fallback: Box<dyn ExtractionEngine>) -> Self {
        Self { local, fallback }
    }
}

#[async_trait]
impl ExtractionEngine for TieredExtractor {
    async fn extract(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionResult> {
        if let Some(result) = self.local.extract(text, context).await {
            return Some(result);
        }

        tracing::debug!(
            fallback = self.fallback.tier_name(),
            "local extraction missed, falling back"
        );
        self.fallback.extract(text, context).await
    }

    fn tier_name(&self) -> &str {
        "tiered"
    }
}
