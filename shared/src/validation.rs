//! Validation utilities for the Crop Advisor Platform
//!
//! The recommendation pipeline itself accepts any well-typed input; these
//! checks are for callers that want to reject malformed requests up front.

use rust_decimal::Decimal;

use crate::models::SoilNutrients;
use crate::reference::ReferenceData;
use crate::types::GpsCoordinates;

/// Most crop interests accepted in one request
pub const MAX_CROP_INTERESTS: usize = 20;

/// Longest accepted crop interest
pub const MAX_CROP_INTEREST_LEN: usize = 50;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate that coordinates are finite and within world bounds
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if !coords.latitude.is_finite() || !coords.longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&coords.latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&coords.longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Check if coordinates fall in the India bounding box of the loaded tables
/// (8°N to 37°N, 68°E to 97°E in the built-in set)
pub fn is_in_india(reference: &ReferenceData, coords: &GpsCoordinates) -> bool {
    reference.india_bounds.contains(coords)
}

// ============================================================================
// Soil Test Validations
// ============================================================================

/// Validate a soil test and the local conditions sent with it
pub fn validate_soil_nutrients(soil: &SoilNutrients) -> Result<(), &'static str> {
    if soil.nitrogen < Decimal::ZERO
        || soil.phosphorus < Decimal::ZERO
        || soil.potassium < Decimal::ZERO
    {
        return Err("Nutrient values cannot be negative");
    }
    if soil.ph < Decimal::ZERO || soil.ph > Decimal::from(14) {
        return Err("pH must be between 0 and 14");
    }
    if soil.humidity_percent < Decimal::ZERO || soil.humidity_percent > Decimal::from(100) {
        return Err("Humidity must be between 0 and 100%");
    }
    if soil.temperature_celsius < Decimal::from(-50) || soil.temperature_celsius > Decimal::from(60)
    {
        return Err("Temperature must be between -50 and 60°C");
    }
    if soil.rainfall_mm < Decimal::ZERO {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate the free-text list of crops the user is interested in
pub fn validate_crop_interests(interests: &[String]) -> Result<(), &'static str> {
    if interests.len() > MAX_CROP_INTERESTS {
        return Err("Too many crop interests (maximum 20)");
    }
    if interests
        .iter()
        .any(|i| i.chars().count() > MAX_CROP_INTEREST_LEN)
    {
        return Err("Crop interest is too long (maximum 50 characters)");
    }
    Ok(())
}
