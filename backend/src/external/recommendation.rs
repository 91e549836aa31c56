//! Crop Recommendation Model Client
//!
//! Client for the externally hosted crop prediction model. The model takes a
//! JSON body (soil readings or coordinates) and answers with a list of crops
//! and their probabilities.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::CropPrediction;

use crate::config::RecommendationServiceConfig;
use crate::error::{AppError, AppResult};

/// Client for the crop prediction microservice
#[derive(Clone)]
pub struct RecommendationClient {
    api_endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Response row from the prediction API
#[derive(Debug, Deserialize)]
pub struct PredictionRow {
    pub crop: String,
    pub probability: f64,
}

impl From<PredictionRow> for CropPrediction {
    fn from(r: PredictionRow) -> Self {
        CropPrediction {
            crop: r.crop,
            probability: r.probability,
        }
    }
}

impl RecommendationClient {
    /// Create a new prediction client
    pub fn new(
        api_endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint,
            api_key,
            http_client,
        })
    }

    /// Create a client from configuration; `None` when no endpoint is set
    pub fn from_config(config: &RecommendationServiceConfig) -> AppResult<Option<Self>> {
        match config.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Self::new(
                endpoint.to_string(),
                config.api_key.clone(),
                Duration::from_secs(config.timeout_secs),
            )
            .map(Some),
            _ => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Send an input body to the model and collect its predictions
    pub async fn predict<T: Serialize + ?Sized>(&self, body: &T) -> AppResult<Vec<CropPrediction>> {
        let mut request = self
            .http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::RecommendationService("Request timed out".to_string())
            } else {
                AppError::RecommendationService(format!("Request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RecommendationService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<PredictionRow> = response.json().await.map_err(|e| {
            AppError::RecommendationService(format!("Failed to parse response: {}", e))
        })?;

        Ok(rows.into_iter().map(CropPrediction::from).collect())
    }
}
