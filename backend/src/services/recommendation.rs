//! Recommendation service
//!
//! Wraps the pure pipeline from `shared` with request validation, region
//! resolution through the reverse geocoder, and the external soil model.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::lookup::{NAME_CHAIN, REGION_CHAIN};
use shared::{
    categorize_nutrients, is_in_india, npk_fit, resolve_season, seasonality_label, today,
    validate_coordinates, validate_crop_interests, validate_soil_nutrients, CropAdvisor,
    CropPrediction, CropProfile, GpsCoordinates, NutrientProfile, Recommendation,
    RecommendationRequest, ReferenceData, RegionClassification, Season, SoilNutrients,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::{GeocodingClient, RecommendationClient};

/// Recommendation service backed by the shared pipeline
#[derive(Clone)]
pub struct RecommendationService {
    advisor: CropAdvisor,
    model: Option<RecommendationClient>,
    geocoder: Option<GeocodingClient>,
}

/// Input for a location-based recommendation
#[derive(Debug, Deserialize)]
pub struct LocationRecommendationInput {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub interested_crops: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Defaults to today in server local time
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Ranked crops for a location
#[derive(Debug, Serialize)]
pub struct LocationRecommendation {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

/// Soil readings in the shape the prediction model expects
#[derive(Debug, Serialize, PartialEq)]
pub struct SoilModelInput {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl From<&SoilNutrients> for SoilModelInput {
    fn from(soil: &SoilNutrients) -> Self {
        let f = |d: Decimal| d.to_f64().unwrap_or_default();
        Self {
            nitrogen: f(soil.nitrogen),
            phosphorus: f(soil.phosphorus),
            potassium: f(soil.potassium),
            temperature: f(soil.temperature_celsius),
            humidity: f(soil.humidity_percent),
            ph: f(soil.ph),
            rainfall: f(soil.rainfall_mm),
        }
    }
}

/// A model prediction with what the reference tables know about the crop
#[derive(Debug, Serialize)]
pub struct AnnotatedPrediction {
    #[serde(flatten)]
    pub prediction: CropPrediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CropProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npk_fit: Option<bool>,
}

/// Soil-based recommendation response
#[derive(Debug, Serialize)]
pub struct SoilRecommendation {
    pub request_id: Uuid,
    pub nutrient_profile: NutrientProfile,
    pub predictions: Vec<AnnotatedPrediction>,
}

/// Season in effect on a date
#[derive(Debug, Serialize)]
pub struct CurrentSeason {
    pub season: Season,
    pub as_of: NaiveDate,
}

/// Crop profile lookup result
#[derive(Debug, Serialize)]
pub struct CropProfileView {
    pub name: String,
    /// Table key the name resolved to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    pub is_default: bool,
    #[serde(flatten)]
    pub profile: CropProfile,
    pub rainfall_band: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_period: Option<String>,
    pub seasonality: String,
}

/// Regional rainfall lookup result
#[derive(Debug, Serialize)]
pub struct RainfallView {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_region: Option<String>,
    pub is_default: bool,
    pub current_mm: f64,
    pub previous_mm: f64,
    pub change_percent: Option<f64>,
}

impl RecommendationService {
    pub fn new(advisor: CropAdvisor) -> Self {
        Self {
            advisor,
            model: None,
            geocoder: None,
        }
    }

    pub fn with_model(mut self, model: Option<RecommendationClient>) -> Self {
        self.model = model;
        self
    }

    pub fn with_geocoder(mut self, geocoder: Option<GeocodingClient>) -> Self {
        self.geocoder = geocoder;
        self
    }

    fn reference(&self) -> &ReferenceData {
        self.advisor.reference()
    }

    /// Whether a point lies inside the India box of the loaded tables
    fn in_coverage(&self, location: &GpsCoordinates) -> bool {
        is_in_india(self.reference(), location)
    }

    /// Soil type and climate for a coordinate
    pub fn classify(&self, latitude: f64, longitude: f64) -> AppResult<RegionClassification> {
        validate_coordinates(&GpsCoordinates::new(latitude, longitude))
            .map_err(|e| invalid("location", e))?;
        Ok(self.advisor.classify(latitude, longitude))
    }

    /// Season for today. Latitude is checked when given but does not change the result.
    pub fn current_season(&self, latitude: Option<f64>) -> AppResult<CurrentSeason> {
        let latitude = latitude.unwrap_or_default();
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude", "Latitude must be between -90 and 90"));
        }
        let as_of = today();
        Ok(CurrentSeason {
            season: resolve_season(&as_of, latitude),
            as_of,
        })
    }

    /// Ranked crops for a location
    pub async fn recommend_for_location(
        &self,
        input: LocationRecommendationInput,
    ) -> AppResult<LocationRecommendation> {
        let location = GpsCoordinates::new(input.latitude, input.longitude);
        validate_coordinates(&location).map_err(|e| invalid("location", e))?;
        validate_crop_interests(&input.interested_crops)
            .map_err(|e| invalid("interested_crops", e))?;

        let request_id = Uuid::new_v4();
        let region = self.resolve_region(request_id, &location, input.region).await;

        let request = RecommendationRequest {
            location,
            interested_crops: input.interested_crops,
            region,
            as_of: input.as_of.unwrap_or_else(today),
        };
        let recommendation = self.advisor.recommend(&request);

        tracing::info!(
            %request_id,
            soil = %recommendation.classification.soil_type,
            climate = %recommendation.classification.climate,
            season = %recommendation.season,
            crops = recommendation.crops.len(),
            "Location recommendation"
        );

        Ok(LocationRecommendation {
            request_id,
            recommendation,
        })
    }

    /// State name for the rainfall lookup: the caller's value, else the geocoder's.
    /// Geocoder failures only lose the regional rainfall figures.
    async fn resolve_region(
        &self,
        request_id: Uuid,
        location: &GpsCoordinates,
        given: Option<String>,
    ) -> Option<String> {
        if let Some(region) = given.filter(|r| !r.trim().is_empty()) {
            return Some(region);
        }
        let geocoder = self.geocoder.as_ref()?;
        if !self.in_coverage(location) {
            return None;
        }

        match geocoder
            .state_name(location.latitude, location.longitude)
            .await
        {
            Ok(state) => {
                tracing::debug!(%request_id, state = ?state, "Reverse geocoded");
                state
            }
            Err(e) => {
                tracing::warn!(%request_id, "Geocoding failed, using default rainfall: {}", e);
                None
            }
        }
    }

    /// Forward a soil test to the prediction model and annotate its answer
    pub async fn recommend_for_soil(&self, soil: SoilNutrients) -> AppResult<SoilRecommendation> {
        validate_soil_nutrients(&soil).map_err(|e| invalid("soil", e))?;
        let model = self
            .model
            .as_ref()
            .ok_or(AppError::RecommendationServiceUnavailable)?;

        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, endpoint = model.endpoint(), "Requesting soil predictions");

        let predictions = model.predict(&SoilModelInput::from(&soil)).await?;
        tracing::info!(%request_id, predictions = predictions.len(), "Soil recommendation");

        Ok(SoilRecommendation {
            request_id,
            nutrient_profile: categorize_nutrients(&soil),
            predictions: annotate_predictions(self.reference(), &soil, predictions),
        })
    }

    /// Reference profile for a crop, falling back to the default profile
    pub fn crop_profile(&self, name: &str) -> CropProfileView {
        let reference = self.reference();
        let resolved = reference.crop_profiles.resolve(name.trim(), NAME_CHAIN);
        let growth_period = resolved
            .key
            .and_then(|key| reference.growth_periods.get(key))
            .cloned();
        CropProfileView {
            name: name.to_string(),
            matched: resolved.key.map(str::to_string),
            is_default: resolved.is_default(),
            profile: resolved.value.clone(),
            rainfall_band: resolved.value.rainfall_band(),
            growth_period,
            seasonality: seasonality_label(reference, resolved.key.unwrap_or(name)),
        }
    }

    /// Rainfall figures for a region, falling back to the default entry
    pub fn rainfall(&self, region: &str) -> RainfallView {
        let resolved = self.reference().rainfall.resolve(region.trim(), REGION_CHAIN);
        RainfallView {
            region: region.to_string(),
            matched_region: resolved.key.map(str::to_string),
            is_default: resolved.is_default(),
            current_mm: resolved.value.current_mm,
            previous_mm: resolved.value.previous_mm,
            change_percent: resolved.value.change_percent(),
        }
    }
}

/// Validation error with the Hindi text for a validator message
fn invalid(field: &str, message: &str) -> AppError {
    AppError::validation(field, message, message_hi(message))
}

fn message_hi(message: &str) -> &'static str {
    match message {
        "Coordinates must be finite numbers" => "निर्देशांक मान्य संख्या होने चाहिए",
        "Latitude must be between -90 and 90" => "अक्षांश -90 और 90 के बीच होना चाहिए",
        "Longitude must be between -180 and 180" => "देशांतर -180 और 180 के बीच होना चाहिए",
        "Nutrient values cannot be negative" => "पोषक तत्वों के मान ऋणात्मक नहीं हो सकते",
        "pH must be between 0 and 14" => "pH 0 और 14 के बीच होना चाहिए",
        "Humidity must be between 0 and 100%" => "आर्द्रता 0 और 100% के बीच होनी चाहिए",
        "Temperature must be between -50 and 60°C" => "तापमान -50 और 60°C के बीच होना चाहिए",
        "Rainfall cannot be negative" => "वर्षा ऋणात्मक नहीं हो सकती",
        "Too many crop interests (maximum 20)" => "बहुत अधिक फसलें चुनी गई हैं (अधिकतम 20)",
        "Crop interest is too long (maximum 50 characters)" => {
            "फसल का नाम बहुत लंबा है (अधिकतम 50 अक्षर)"
        }
        _ => "अमान्य इनपुट",
    }
}

/// Attach reference profiles and NPK fit, highest probability first
pub fn annotate_predictions(
    reference: &ReferenceData,
    soil: &SoilNutrients,
    predictions: Vec<CropPrediction>,
) -> Vec<AnnotatedPrediction> {
    let mut annotated: Vec<AnnotatedPrediction> = predictions
        .into_iter()
        .map(|prediction| {
            let resolved = reference
                .crop_profiles
                .resolve(prediction.crop.trim(), NAME_CHAIN);
            let profile = (!resolved.is_default()).then(|| resolved.value.clone());
            let npk_fit = profile.as_ref().and_then(|p| npk_fit(p, soil));
            AnnotatedPrediction {
                prediction,
                profile,
                npk_fit,
            }
        })
        .collect();

    annotated.sort_by(|a, b| b.prediction.probability.total_cmp(&a.prediction.probability));
    annotated
}
