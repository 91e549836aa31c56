//! Reverse geocoding client
//!
//! Resolves coordinates to an Indian state name through a Nominatim-style
//! `/reverse` endpoint. The state name feeds the regional rainfall lookup.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::GeocodingConfig;
use crate::error::{AppError, AppResult};

/// Reverse geocoding client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

/// Nominatim reverse response; only the address is read
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<ReverseAddress>,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    state: Option<String>,
}

impl GeocodingClient {
    pub fn new(base_url: String, user_agent: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration; `None` when no endpoint is set
    pub fn from_config(config: &GeocodingConfig) -> AppResult<Option<Self>> {
        match config.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Self::new(
                endpoint.to_string(),
                &config.user_agent,
                Duration::from_secs(config.timeout_secs),
            )
            .map(Some),
            _ => Ok(None),
        }
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }

    /// State containing the coordinates, if the service knows one
    pub async fn state_name(&self, latitude: f64, longitude: f64) -> AppResult<Option<String>> {
        let response = self
            .client
            .get(self.reverse_url())
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Geocoding(format!(
                "API returned {}",
                response.status()
            )));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse response: {}", e)))?;

        Ok(state_from(body))
    }
}

fn state_from(body: ReverseResponse) -> Option<String> {
    body.address
        .and_then(|a| a.state)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
