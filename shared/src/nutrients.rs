//! NPK fertility categorisation

use rust_decimal::Decimal;

use crate::models::{CropProfile, NutrientLevel, NutrientProfile, SoilNutrients};

/// Low/high cut-offs for one nutrient; values between them are medium
#[derive(Debug, Clone, Copy)]
pub struct NutrientThresholds {
    pub low_below: Decimal,
    pub high_above: Decimal,
}

impl NutrientThresholds {
    pub const fn new(low_below: u32, high_above: u32) -> Self {
        Self {
            low_below: Decimal::from_parts(low_below, 0, 0, false, 0),
            high_above: Decimal::from_parts(high_above, 0, 0, false, 0),
        }
    }

    pub fn level(&self, value: Decimal) -> NutrientLevel {
        if value < self.low_below {
            NutrientLevel::Low
        } else if value > self.high_above {
            NutrientLevel::High
        } else {
            NutrientLevel::Medium
        }
    }
}

pub const NITROGEN_THRESHOLDS: NutrientThresholds = NutrientThresholds::new(50, 100);
pub const PHOSPHORUS_THRESHOLDS: NutrientThresholds = NutrientThresholds::new(30, 60);
pub const POTASSIUM_THRESHOLDS: NutrientThresholds = NutrientThresholds::new(30, 80);

/// Categorise each macronutrient of a soil test
pub fn categorize_nutrients(soil: &SoilNutrients) -> NutrientProfile {
    NutrientProfile {
        nitrogen: NITROGEN_THRESHOLDS.level(soil.nitrogen),
        phosphorus: PHOSPHORUS_THRESHOLDS.level(soil.phosphorus),
        potassium: POTASSIUM_THRESHOLDS.level(soil.potassium),
    }
}

/// Whether measured NPK sits inside the crop's preferred ranges.
/// `None` when the profile carries no NPK ranges.
pub fn npk_fit(profile: &CropProfile, soil: &SoilNutrients) -> Option<bool> {
    profile.npk.map(|range| {
        range.nitrogen.contains(soil.nitrogen)
            && range.phosphorus.contains(soil.phosphorus)
            && range.potassium.contains(soil.potassium)
    })
}
