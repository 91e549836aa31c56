//! Soil nutrient readings entered by the user

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A soil test plus the local conditions the recommendation model expects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilNutrients {
    pub nitrogen: Decimal,
    pub phosphorus: Decimal,
    pub potassium: Decimal,
    pub temperature_celsius: Decimal,
    pub humidity_percent: Decimal,
    pub ph: Decimal,
    pub rainfall_mm: Decimal,
}

/// Fertility category of a single nutrient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NutrientLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientLevel::Low => write!(f, "Low"),
            NutrientLevel::Medium => write!(f, "Medium"),
            NutrientLevel::High => write!(f, "High"),
        }
    }
}

/// NPK levels of a soil test
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutrientProfile {
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
}
