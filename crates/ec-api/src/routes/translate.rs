//! Free-text translation endpoint.

use axum::Json;
use axum::extract::State;
use ec_intake::{Translation, VocabularyTier};
use ec_protocol::ExtractionContext;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for a one-off translation.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Free-text description ("a 30-foot vinyl backdrop").
    pub text: String,
    /// Known facts to help disambiguate.
    #[serde(default)]
    pub context: ExtractionContext,
    /// Vocabulary for the explanation. Defaults to plain.
    #[serde(default)]
    pub tier: VocabularyTier,
}

/// POST /api/v1/translate: description in, line items out. Extraction
/// failure is reported as `degraded`, never as an error.
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> ApiResult<Json<Translation>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }
    let translation = state
        .translator
        .translate(&req.text, &req.context, req.tier)
        .await;
    Ok(Json(translation))
}
