//! HTTP handlers for crop recommendation endpoints

use axum::{extract::State, Json};
use shared::SoilNutrients;

use crate::error::AppResult;
use crate::services::recommendation::{
    LocationRecommendation, LocationRecommendationInput, SoilRecommendation,
};
use crate::AppState;

/// Rank crops for a location
pub async fn recommend_for_location(
    State(state): State<AppState>,
    Json(input): Json<LocationRecommendationInput>,
) -> AppResult<Json<LocationRecommendation>> {
    let recommendation = state.recommendations().recommend_for_location(input).await?;
    Ok(Json(recommendation))
}

/// Predict crops from a soil test via the external model
pub async fn recommend_for_soil(
    State(state): State<AppState>,
    Json(soil): Json<SoilNutrients>,
) -> AppResult<Json<SoilRecommendation>> {
    let recommendation = state.recommendations().recommend_for_soil(soil).await?;
    Ok(Json(recommendation))
}
