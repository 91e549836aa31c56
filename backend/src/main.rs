//! Crop Advisor Platform - Backend Server
//!
//! Location- and soil-based crop recommendations for Indian farmers, served
//! over HTTP on top of the shared recommendation pipeline.

use axum::{routing::get, Router};
use shared::{CropAdvisor, ReferenceData};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

use error::{AppError, AppResult};
use external::{GeocodingClient, RecommendationClient};
use services::RecommendationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub advisor: CropAdvisor,
    pub model: Option<RecommendationClient>,
    pub geocoder: Option<GeocodingClient>,
}

impl AppState {
    pub fn recommendations(&self) -> RecommendationService {
        RecommendationService::new(self.advisor.clone())
            .with_model(self.model.clone())
            .with_geocoder(self.geocoder.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisor_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    let reference = load_reference(config.reference.tables_path.as_deref())?;

    let model = RecommendationClient::from_config(&config.recommendation_service)?;
    match &model {
        Some(client) => tracing::info!("Recommendation model at {}", client.endpoint()),
        None => tracing::warn!("Recommendation model not configured; soil route disabled"),
    }

    let geocoder = GeocodingClient::from_config(&config.geocoding)?;
    if geocoder.is_none() {
        tracing::info!("Reverse geocoding not configured; default rainfall applies");
    }

    // Create application state
    let state = AppState {
        advisor: CropAdvisor::new(Arc::new(reference)),
        model,
        geocoder,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in tables, or a JSON replacement when a path is configured
fn load_reference(path: Option<&str>) -> AppResult<ReferenceData> {
    let Some(path) = path else {
        return Ok(ReferenceData::standard());
    };

    tracing::info!("Loading reference tables from {}", path);
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::Configuration(format!("Cannot read {}: {}", path, e)))?;
    ReferenceData::from_json(&json).map_err(|e| {
        AppError::Configuration(format!("Invalid reference tables in {}: {}", path, e))
    })
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Advisor Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
