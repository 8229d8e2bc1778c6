//! Organization footprint endpoints.

use axum::Json;
use ec_accounting::organization::{
    Industry, OrganizationInput, OrganizationResult, OrganizationSize, OrganizationType,
    calculate_organization, estimate_organization,
};
use serde::Deserialize;

use crate::error::ApiResult;

/// POST /api/v1/organization/calculate: scope totals from activity data.
pub async fn calculate(
    Json(input): Json<OrganizationInput>,
) -> ApiResult<Json<OrganizationResult>> {
    let result = calculate_organization(&input)?;
    tracing::info!(
        industry = ?input.industry,
        total = result.total,
        "organization calculated"
    );
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub org_type: OrganizationType,
    #[serde(default)]
    pub size: OrganizationSize,
    #[serde(default)]
    pub industry: Industry,
}

/// POST /api/v1/organization/estimate: quick size-based estimate.
pub async fn estimate(Json(req): Json<EstimateRequest>) -> Json<OrganizationResult> {
    Json(estimate_organization(req.org_type, req.size, req.industry))
}
