//! WebAssembly module for the Crop Advisor Platform
//!
//! Runs the recommendation pipeline in the browser so the location flow
//! keeps working offline:
//! - Region classification
//! - Season resolution
//! - Crop ranking
//! - Soil nutrient categorisation

use std::cell::RefCell;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    categorize_nutrients, is_in_india, resolve_season, validate_coordinates, CropAdvisor,
    GpsCoordinates, NutrientLevel, RecommendationRequest, ReferenceData, SoilNutrients,
    NITROGEN_THRESHOLDS, PHOSPHORUS_THRESHOLDS, POTASSIUM_THRESHOLDS,
};
use wasm_bindgen::prelude::*;

thread_local! {
    static ADVISOR: RefCell<CropAdvisor> = RefCell::new(CropAdvisor::default());
}

fn advisor() -> CropAdvisor {
    ADVISOR.with(|a| a.borrow().clone())
}

/// Request shape sent by the browser UI
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowserRequest {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    interested_crops: Vec<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

/// Today according to the browser clock
fn browser_today() -> NaiveDate {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_else(shared::today)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        shared::today()
    }
}

fn to_js(e: String) -> JsValue {
    JsValue::from_str(&e)
}

// ============================================================================
// Reference tables
// ============================================================================

fn load_tables(json: &str) -> Result<(), String> {
    let data =
        ReferenceData::from_json(json).map_err(|e| format!("Invalid reference JSON: {}", e))?;
    ADVISOR.with(|a| *a.borrow_mut() = CropAdvisor::new(Arc::new(data)));
    Ok(())
}

/// Replace the built-in reference tables with a JSON table set
#[wasm_bindgen]
pub fn load_reference_tables(json: &str) -> Result<(), JsValue> {
    load_tables(json).map_err(to_js)?;
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"Crop advisor: custom reference tables loaded".into());
    Ok(())
}

/// Go back to the built-in reference tables
#[wasm_bindgen]
pub fn reset_reference_tables() {
    ADVISOR.with(|a| *a.borrow_mut() = CropAdvisor::default());
}

// ============================================================================
// Pipeline
// ============================================================================

fn classify_json(latitude: f64, longitude: f64) -> Result<String, String> {
    validate_coordinates(&GpsCoordinates::new(latitude, longitude))?;
    serde_json::to_string(&advisor().classify(latitude, longitude)).map_err(|e| e.to_string())
}

/// Soil type and climate for a coordinate, as JSON
#[wasm_bindgen]
pub fn classify_region(latitude: f64, longitude: f64) -> Result<String, JsValue> {
    classify_json(latitude, longitude).map_err(to_js)
}

fn recommend_json(request_json: &str) -> Result<String, String> {
    let req: BrowserRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))?;
    let location = GpsCoordinates::new(req.latitude, req.longitude);
    validate_coordinates(&location)?;

    let recommendation = advisor().recommend(&RecommendationRequest {
        location,
        interested_crops: req.interested_crops,
        region: req.region,
        as_of: req.as_of.unwrap_or_else(browser_today),
    });
    serde_json::to_string(&recommendation).map_err(|e| e.to_string())
}

/// Full recommendation for a `{latitude, longitude, interestedCrops?, region?, asOf?}` request
#[wasm_bindgen]
pub fn recommend_crops(request_json: &str) -> Result<String, JsValue> {
    recommend_json(request_json).map_err(to_js)
}

/// Season in effect today, e.g. "kharif"
#[wasm_bindgen]
pub fn current_season(latitude: f64) -> String {
    let season = resolve_season(&browser_today(), latitude);
    season.to_string().to_lowercase()
}

/// Season for an ISO date such as "2024-07-15"
#[wasm_bindgen]
pub fn season_for_date(iso_date: &str, latitude: f64) -> Result<String, JsValue> {
    let date = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d")
        .map_err(|e| to_js(format!("Invalid date: {}", e)))?;
    Ok(resolve_season(&date, latitude).to_string().to_lowercase())
}

/// Rainfall suitability score (0-100) for a crop's band
#[wasm_bindgen]
pub fn rainfall_suitability(current_mm: f64, min_mm: f64, max_mm: f64) -> u8 {
    shared::rainfall_suitability(current_mm, min_mm, max_mm)
}

/// Whether the coordinate lies in the India bounding box of the loaded tables
#[wasm_bindgen]
pub fn is_location_in_india(latitude: f64, longitude: f64) -> bool {
    is_in_india(advisor().reference(), &GpsCoordinates::new(latitude, longitude))
}

// ============================================================================
// Soil nutrients
// ============================================================================

fn categorize_json(soil_json: &str) -> Result<String, String> {
    let soil: SoilNutrients =
        serde_json::from_str(soil_json).map_err(|e| format!("Invalid soil JSON: {}", e))?;
    serde_json::to_string(&categorize_nutrients(&soil)).map_err(|e| e.to_string())
}

/// Low/medium/high profile for a soil test, as JSON
#[wasm_bindgen]
pub fn categorize_soil_nutrients(soil_json: &str) -> Result<String, JsValue> {
    categorize_json(soil_json).map_err(to_js)
}

fn level_of(nutrient: &str, value: f64) -> Option<NutrientLevel> {
    let value = Decimal::try_from(value).ok()?;
    let thresholds = match nutrient.to_lowercase().as_str() {
        "n" | "nitrogen" => NITROGEN_THRESHOLDS,
        "p" | "phosphorus" => PHOSPHORUS_THRESHOLDS,
        "k" | "potassium" => POTASSIUM_THRESHOLDS,
        _ => return None,
    };
    Some(thresholds.level(value))
}

/// Level of a single nutrient reading, or "unknown"
#[wasm_bindgen]
pub fn nutrient_level(nutrient: &str, value: f64) -> String {
    level_of(nutrient, value)
        .map(|l| format!("{}", l))
        .unwrap_or_else(|| "unknown".to_string())
}
