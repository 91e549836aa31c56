//! Configuration management for the Crop Advisor Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// External crop recommendation model
    pub recommendation_service: RecommendationServiceConfig,

    /// Reverse geocoding used to name the state for rainfall lookup
    pub geocoding: GeocodingConfig,

    /// Reference table overrides
    #[serde(default)]
    pub reference: ReferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationServiceConfig {
    /// Prediction endpoint; the soil route answers 503 without it
    pub endpoint: Option<String>,

    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Base URL of a Nominatim-compatible service
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Nominatim rejects requests without a user agent
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReferenceConfig {
    /// JSON file replacing the built-in reference tables
    pub tables_path: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("recommendation_service.timeout_secs", 10)?
            .set_default("geocoding.timeout_secs", 5)?
            .set_default("geocoding.user_agent", "crop-advisor/0.1")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
