//! Emission factor catalog endpoints.

use axum::Json;
use axum::extract::Path;
use ec_accounting::catalog::{self, CATALOG_VERSION, FactorEntry};
use ec_protocol::ItemCategory;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

const CATEGORIES: [ItemCategory; 5] = [
    ItemCategory::Materials,
    ItemCategory::Energy,
    ItemCategory::Transportation,
    ItemCategory::Food,
    ItemCategory::Waste,
];

#[derive(Debug, Serialize)]
pub struct CategoryFactors {
    pub category: ItemCategory,
    pub factors: &'static [FactorEntry],
    /// Used when no keyed factor matches.
    pub generic: FactorEntry,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub version: &'static str,
    pub categories: Vec<CategoryFactors>,
}

/// GET /api/v1/emission-factors: the whole catalog.
pub async fn list_factors() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        version: CATALOG_VERSION,
        categories: CATEGORIES
            .into_iter()
            .map(|category| CategoryFactors {
                category,
                factors: catalog::entries(category),
                generic: catalog::generic(category),
            })
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct FactorResponse {
    pub category: ItemCategory,
    #[serde(flatten)]
    pub entry: FactorEntry,
    pub version: &'static str,
}

/// GET /api/v1/emission-factors/{key}: one factor by key.
pub async fn get_factor(Path(key): Path<String>) -> ApiResult<Json<FactorResponse>> {
    let (category, entry) = catalog::quick_lookup(&key)
        .ok_or_else(|| ApiError::NotFound(format!("emission factor '{key}' not found")))?;
    Ok(Json(FactorResponse {
        category,
        entry,
        version: CATALOG_VERSION,
    }))
}
