//! Crop reference profiles and ranked recommendation output

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Agronomic reference record for a single crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    /// Relative water demand, 0-100
    pub water_needs_base: u8,
    /// Display string, e.g. "20-35°C"
    pub ideal_temperature: String,
    pub min_rainfall_mm: f64,
    pub max_rainfall_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npk: Option<NpkRange>,
}

impl CropProfile {
    pub fn new(
        water_needs_base: u8,
        ideal_temperature: &str,
        min_rainfall_mm: f64,
        max_rainfall_mm: f64,
    ) -> Self {
        Self {
            water_needs_base,
            ideal_temperature: ideal_temperature.to_string(),
            min_rainfall_mm,
            max_rainfall_mm,
            npk: None,
        }
    }

    pub fn with_npk(mut self, npk: NpkRange) -> Self {
        self.npk = Some(npk);
        self
    }

    /// Required rainfall band as shown to the user
    pub fn rainfall_band(&self) -> String {
        format!("{}-{} mm", self.min_rainfall_mm, self.max_rainfall_mm)
    }
}

/// Inclusive range for a single nutrient reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutrientRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl NutrientRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: Decimal::from(min),
            max: Decimal::from(max),
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Preferred nitrogen, phosphorus and potassium ranges for a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NpkRange {
    pub nitrogen: NutrientRange,
    pub phosphorus: NutrientRange,
    pub potassium: NutrientRange,
}

/// Rainfall figures and suitability for a ranked crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RainfallAssessment {
    pub required: String,
    pub current_mm: f64,
    pub previous_mm: f64,
    /// 0-100
    pub suitability: u8,
}

/// A crop recommendation with its display attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedCrop {
    pub name: String,
    pub description: String,
    pub water_needs: u8,
    pub growth_period: String,
    pub ideal_temperature: String,
    pub soil_ph: String,
    pub yield_estimate: String,
    pub seasonality: String,
    pub rainfall: RainfallAssessment,
}
