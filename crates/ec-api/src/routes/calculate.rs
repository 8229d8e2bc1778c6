//! Stateless calculation and recommendation endpoints.

use axum::Json;
use ec_accounting::benchmark::{InfluenceInsight, influence_insights};
use ec_accounting::{build_strategy, calculate_event_emissions, profile_from_json};
use ec_protocol::{CalculationResult, EventProfile, ReductionStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiResult;

/// Calculation result with its advice.
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub result: CalculationResult,
    pub strategy: ReductionStrategy,
    pub insights: Vec<InfluenceInsight>,
}

impl CalculationResponse {
    /// Calculate a validated profile and attach recommendations.
    pub fn for_profile(profile: &EventProfile) -> ApiResult<Self> {
        let result = calculate_event_emissions(profile)?;
        let strategy = build_strategy(&result, profile);
        let insights = influence_insights(&result.tiered_emissions, result.influence_score);
        tracing::info!(
            event_type = %profile.event_type,
            attendance = profile.attendance,
            total = result.total,
            tier = ?result.benchmark.performance_tier,
            "event calculated"
        );
        Ok(Self {
            result,
            strategy,
            insights,
        })
    }
}

/// POST /api/v1/calculate: EventProfile JSON in, result and strategy out.
///
/// The body is read as raw JSON so a bad field is reported by path.
pub async fn calculate(Json(body): Json<Value>) -> ApiResult<Json<CalculationResponse>> {
    let profile = profile_from_json(&body)?;
    Ok(Json(CalculationResponse::for_profile(&profile)?))
}

/// Request body for regenerating recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub result: CalculationResult,
    pub profile: EventProfile,
}

/// POST /api/v1/recommendations: strategy for an existing result.
pub async fn recommendations(
    Json(req): Json<RecommendationRequest>,
) -> Json<ReductionStrategy> {
    Json(build_strategy(&req.result, &req.profile))
}
