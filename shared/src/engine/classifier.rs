//! Region classifier: coordinate to soil type and climate

use crate::models::RegionClassification;
use crate::reference::ReferenceData;
use crate::types::{first_match, GpsCoordinates};

/// Classify a coordinate using bounding-box rules.
///
/// Points outside the India box get the fixed outside classification. Inside
/// India, soil and climate are resolved independently: for each, the first
/// matching rule in priority order wins and the table default applies when
/// no rule matches.
pub fn classify(reference: &ReferenceData, point: &GpsCoordinates) -> RegionClassification {
    if !reference.india_bounds.contains(point) {
        return reference.outside_india;
    }

    let soil_type = first_match(&reference.soil_regions, point)
        .map(|r| r.value)
        .unwrap_or(reference.default_soil);
    let climate = first_match(&reference.climate_regions, point)
        .map(|r| r.value)
        .unwrap_or(reference.default_climate);

    RegionClassification { soil_type, climate }
}
