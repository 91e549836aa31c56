//! Soil and climate classification models

use serde::{Deserialize, Serialize};

/// Broad soil groups of the Indian subcontinent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Alluvial,
    Arid,
    Black,
    Red,
    Mountain,
    Laterite,
    Loam,
}

impl SoilType {
    pub const ALL: [SoilType; 7] = [
        SoilType::Alluvial,
        SoilType::Arid,
        SoilType::Black,
        SoilType::Red,
        SoilType::Mountain,
        SoilType::Laterite,
        SoilType::Loam,
    ];
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilType::Alluvial => write!(f, "Alluvial"),
            SoilType::Arid => write!(f, "Arid"),
            SoilType::Black => write!(f, "Black"),
            SoilType::Red => write!(f, "Red"),
            SoilType::Mountain => write!(f, "Mountain"),
            SoilType::Laterite => write!(f, "Laterite"),
            SoilType::Loam => write!(f, "Loam"),
        }
    }
}

/// Climate categories used for crop selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Tropical,
    Subtropical,
    Arid,
    Humid,
    Mountain,
    Temperate,
}

impl std::fmt::Display for Climate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Climate::Tropical => write!(f, "Tropical"),
            Climate::Subtropical => write!(f, "Subtropical"),
            Climate::Arid => write!(f, "Arid"),
            Climate::Humid => write!(f, "Humid"),
            Climate::Mountain => write!(f, "Mountain"),
            Climate::Temperate => write!(f, "Temperate"),
        }
    }
}

/// Soil type and climate derived from a coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RegionClassification {
    pub soil_type: SoilType,
    pub climate: Climate,
}

impl RegionClassification {
    /// Classification used for points outside India
    pub const OUTSIDE_INDIA: RegionClassification = RegionClassification {
        soil_type: SoilType::Loam,
        climate: Climate::Temperate,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_serializes_lowercase() {
        let json = serde_json::to_string(&RegionClassification {
            soil_type: SoilType::Alluvial,
            climate: Climate::Subtropical,
        })
        .unwrap();
        assert_eq!(json, r#"{"soilType":"alluvial","climate":"subtropical"}"#);
    }
}
