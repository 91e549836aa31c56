//! HTTP handlers for classification and reference table lookups

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::RegionClassification;

use crate::error::AppResult;
use crate::services::recommendation::{CropProfileView, CurrentSeason, RainfallView};
use crate::AppState;

/// Query parameters for region classification
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Classify a coordinate into soil type and climate
pub async fn classify_region(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> AppResult<Json<RegionClassification>> {
    let classification = state
        .recommendations()
        .classify(query.latitude, query.longitude)?;
    Ok(Json(classification))
}

/// Query parameters for the current season
#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub latitude: Option<f64>,
}

/// Growing season in effect today
pub async fn current_season(
    State(state): State<AppState>,
    Query(query): Query<SeasonQuery>,
) -> AppResult<Json<CurrentSeason>> {
    let season = state.recommendations().current_season(query.latitude)?;
    Ok(Json(season))
}

/// Crop profile by name
pub async fn get_crop_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<CropProfileView> {
    Json(state.recommendations().crop_profile(&name))
}

/// Rainfall figures for a region
pub async fn get_rainfall(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Json<RainfallView> {
    Json(state.recommendations().rainfall(&region))
}
