//! Recommendation request and response models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{RankedCrop, RegionClassification, Season};
use crate::types::GpsCoordinates;

/// One row of the external recommendation model's response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPrediction {
    pub crop: String,
    pub probability: f64,
}

/// Input for a location-based recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub location: GpsCoordinates,
    #[serde(default)]
    pub interested_crops: Vec<String>,
    /// State name used for rainfall lookup; default rainfall applies when absent
    #[serde(default)]
    pub region: Option<String>,
    pub as_of: NaiveDate,
}

/// Classification, season and ranked crops for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub classification: RegionClassification,
    pub season: Season,
    pub region: Option<String>,
    pub crops: Vec<RankedCrop>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
