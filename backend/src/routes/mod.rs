//! Route definitions for the Crop Advisor Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/regions", region_routes())
        .nest("/seasons", season_routes())
        .nest("/recommendations", recommendation_routes())
        .route("/crops/:name", get(handlers::get_crop_profile))
        .route("/rainfall/:region", get(handlers::get_rainfall))
}

/// Region classification routes
fn region_routes() -> Router<AppState> {
    Router::new().route("/classify", get(handlers::classify_region))
}

/// Season routes
fn season_routes() -> Router<AppState> {
    Router::new().route("/current", get(handlers::current_season))
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/location", post(handlers::recommend_for_location))
        .route("/soil", post(handlers::recommend_for_soil))
}
