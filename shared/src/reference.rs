//! Reference tables for the recommendation pipeline
//!
//! `ReferenceData` is built once and passed by reference into the pipeline
//! stages. It round-trips through JSON so a deployment can ship an alternate
//! table set without a rebuild.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lookup::{KeyedTable, NAME_CHAIN, REGION_CHAIN};
use crate::models::{
    Climate, CropProfile, NpkRange, NutrientRange, RegionClassification, RegionalRainfall,
    Season, SoilType,
};
use crate::types::{GeoBox, NamedRegion};

/// All immutable tables read by classification, selection and ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceData {
    /// Approximate extent of India; points outside get `outside_india`
    pub india_bounds: GeoBox,
    pub outside_india: RegionClassification,

    /// Soil rules in priority order
    pub soil_regions: Vec<NamedRegion<SoilType>>,
    pub default_soil: SoilType,

    /// Climate rules in priority order
    pub climate_regions: Vec<NamedRegion<Climate>>,
    pub default_climate: Climate,

    pub crops_by_climate_soil: BTreeMap<Climate, BTreeMap<SoilType, Vec<String>>>,
    pub seasonal_crops: BTreeMap<Season, Vec<String>>,
    /// How many crops from the season list join the candidate set
    pub seasonal_candidate_count: usize,

    pub crop_profiles: KeyedTable<CropProfile>,
    pub growth_periods: BTreeMap<String, String>,

    pub soil_ph: BTreeMap<SoilType, String>,
    pub default_soil_ph: String,

    /// Rainfall keyed by Indian state name
    pub rainfall: KeyedTable<RegionalRainfall>,

    pub yield_brackets: Vec<String>,
    /// Index into `yield_brackets` used for crops the user asked about
    pub preferred_yield_bracket: usize,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceData {
    /// Load a table set from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Crops listed for a climate and soil pair, empty when the pair has no entry
    pub fn crops_for(&self, climate: Climate, soil_type: SoilType) -> &[String] {
        self.crops_by_climate_soil
            .get(&climate)
            .and_then(|by_soil| by_soil.get(&soil_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn season_crops(&self, season: Season) -> &[String] {
        self.seasonal_crops
            .get(&season)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn crop_profile(&self, crop: &str) -> &CropProfile {
        self.crop_profiles.lookup(crop, NAME_CHAIN)
    }

    pub fn regional_rainfall(&self, region: Option<&str>) -> &RegionalRainfall {
        match region {
            Some(name) => self.rainfall.lookup(name, REGION_CHAIN),
            None => &self.rainfall.default,
        }
    }

    pub fn soil_ph_for(&self, soil_type: SoilType) -> &str {
        self.soil_ph
            .get(&soil_type)
            .map(String::as_str)
            .unwrap_or(&self.default_soil_ph)
    }

    /// The built-in table set for the Indian subcontinent
    pub fn standard() -> Self {
        Self {
            india_bounds: GeoBox::new(8.0, 37.0, 68.0, 97.0),
            outside_india: RegionClassification::OUTSIDE_INDIA,
            soil_regions: standard_soil_regions(),
            default_soil: SoilType::Alluvial,
            climate_regions: standard_climate_regions(),
            default_climate: Climate::Subtropical,
            crops_by_climate_soil: standard_crop_table(),
            seasonal_crops: standard_seasonal_crops(),
            seasonal_candidate_count: 3,
            crop_profiles: standard_crop_profiles(),
            growth_periods: standard_growth_periods(),
            soil_ph: standard_soil_ph(),
            default_soil_ph: "6.5-7.5".to_string(),
            rainfall: standard_rainfall(),
            yield_brackets: vec![
                "2-3 tons/acre".to_string(),
                "3-5 tons/acre".to_string(),
                "1-2 tons/acre".to_string(),
                "5-8 tons/acre".to_string(),
            ],
            preferred_yield_bracket: 1,
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn standard_soil_regions() -> Vec<NamedRegion<SoilType>> {
    vec![
        NamedRegion::new(
            "Indo-Gangetic Plains",
            vec![GeoBox::new(24.0, 31.0, 74.0, 88.0)],
            SoilType::Alluvial,
        ),
        NamedRegion::new(
            "Rajasthan and Gujarat",
            vec![GeoBox::new(20.0, 30.0, 68.0, 76.0)],
            SoilType::Arid,
        ),
        NamedRegion::new(
            "Deccan Plateau",
            vec![GeoBox::new(15.0, 24.0, 73.0, 80.0)],
            SoilType::Black,
        ),
        NamedRegion::new(
            "Eastern coastal band",
            vec![GeoBox::new(8.0, 24.0, 80.0, 88.0)],
            SoilType::Red,
        ),
        NamedRegion::new(
            "Himalayan band",
            vec![
                GeoBox::new(30.0, 37.0, 72.0, 97.0),
                GeoBox::new(26.5, 29.5, 88.0, 97.0),
            ],
            SoilType::Mountain,
        ),
        NamedRegion::new(
            "Kerala and Western Ghats",
            vec![GeoBox::new(8.0, 13.0, 74.0, 77.5)],
            SoilType::Laterite,
        ),
    ]
}

fn standard_climate_regions() -> Vec<NamedRegion<Climate>> {
    vec![
        NamedRegion::new(
            "Himalayan",
            vec![GeoBox::new(30.0, 37.0, 72.0, 97.0)],
            Climate::Mountain,
        ),
        NamedRegion::new(
            "Thar Desert",
            vec![GeoBox::new(24.0, 30.0, 69.0, 75.0)],
            Climate::Arid,
        ),
        NamedRegion::new(
            "Coastal strips",
            vec![
                // western coast near 73°E
                GeoBox::new(8.0, 21.0, 72.5, 74.0),
                // eastern coast near 80°E
                GeoBox::new(8.0, 16.0, 79.5, 81.0),
            ],
            Climate::Tropical,
        ),
        NamedRegion::new(
            "Northeast",
            vec![GeoBox::new(22.0, 29.5, 89.0, 97.0)],
            Climate::Humid,
        ),
        NamedRegion::new(
            "Central band",
            vec![GeoBox::new(20.0, 26.0, 74.0, 86.0)],
            Climate::Subtropical,
        ),
        NamedRegion::new(
            "Southern peninsula",
            vec![GeoBox::new(-90.0, 17.0, -180.0, 180.0)],
            Climate::Tropical,
        ),
    ]
}

fn standard_crop_table() -> BTreeMap<Climate, BTreeMap<SoilType, Vec<String>>> {
    let rows: &[(Climate, SoilType, &[&str])] = &[
        (Climate::Tropical, SoilType::Alluvial, &["Rice", "Coconut", "Banana", "Sugarcane"]),
        (Climate::Tropical, SoilType::Black, &["Cotton", "Sugarcane", "Groundnut"]),
        (Climate::Tropical, SoilType::Red, &["Rice", "Ragi", "Groundnut", "Cashew"]),
        (Climate::Tropical, SoilType::Laterite, &["Coconut", "Rubber", "Cashew", "Black Pepper"]),
        (Climate::Tropical, SoilType::Loam, &["Rice", "Banana", "Vegetables"]),
        (
            Climate::Subtropical,
            SoilType::Alluvial,
            &["Wheat", "Rice", "Sugarcane", "Maize", "Mustard"],
        ),
        (Climate::Subtropical, SoilType::Black, &["Cotton", "Soybean", "Jowar", "Chickpea"]),
        (Climate::Subtropical, SoilType::Red, &["Groundnut", "Ragi", "Maize", "Tobacco"]),
        (Climate::Subtropical, SoilType::Arid, &["Bajra", "Mustard", "Chickpea"]),
        (Climate::Subtropical, SoilType::Loam, &["Wheat", "Maize", "Vegetables"]),
        (Climate::Arid, SoilType::Arid, &["Bajra", "Jowar", "Mustard", "Chickpea"]),
        (Climate::Arid, SoilType::Alluvial, &["Wheat", "Bajra", "Cotton"]),
        (Climate::Arid, SoilType::Black, &["Cotton", "Jowar", "Groundnut"]),
        (Climate::Humid, SoilType::Alluvial, &["Rice", "Jute", "Tea"]),
        (Climate::Humid, SoilType::Red, &["Rice", "Tea", "Maize"]),
        (Climate::Humid, SoilType::Mountain, &["Tea", "Rice", "Maize"]),
        (Climate::Humid, SoilType::Laterite, &["Tea", "Black Pepper", "Rubber"]),
        (Climate::Mountain, SoilType::Mountain, &["Apple", "Potato", "Barley", "Maize"]),
        (Climate::Mountain, SoilType::Alluvial, &["Rice", "Wheat", "Potato"]),
        (Climate::Temperate, SoilType::Loam, &["Wheat", "Barley", "Potato", "Apple"]),
        (Climate::Temperate, SoilType::Alluvial, &["Wheat", "Maize", "Potato"]),
    ];

    let mut table: BTreeMap<Climate, BTreeMap<SoilType, Vec<String>>> = BTreeMap::new();
    for (climate, soil, crops) in rows {
        table
            .entry(*climate)
            .or_default()
            .insert(*soil, names(crops));
    }
    table
}

fn standard_seasonal_crops() -> BTreeMap<Season, Vec<String>> {
    BTreeMap::from([
        (
            Season::Kharif,
            names(&[
                "Rice", "Maize", "Cotton", "Soybean", "Groundnut", "Sugarcane", "Bajra", "Jowar",
            ]),
        ),
        (
            Season::Rabi,
            names(&["Wheat", "Barley", "Mustard", "Chickpea", "Lentil", "Peas", "Potato"]),
        ),
        (
            Season::Zaid,
            names(&["Watermelon", "Muskmelon", "Cucumber", "Moong", "Fodder", "Vegetables"]),
        ),
    ])
}

fn npk(n: (i64, i64), p: (i64, i64), k: (i64, i64)) -> NpkRange {
    NpkRange {
        nitrogen: NutrientRange::new(n.0, n.1),
        phosphorus: NutrientRange::new(p.0, p.1),
        potassium: NutrientRange::new(k.0, k.1),
    }
}

fn standard_crop_profiles() -> KeyedTable<CropProfile> {
    let mut t = KeyedTable::new(CropProfile::new(60, "20-30°C", 500.0, 1500.0));
    t.insert(
        "Rice",
        CropProfile::new(80, "20-35°C", 1000.0, 2000.0)
            .with_npk(npk((60, 100), (35, 60), (35, 45))),
    )
    .insert(
        "Wheat",
        CropProfile::new(50, "10-25°C", 450.0, 650.0).with_npk(npk((80, 120), (40, 60), (30, 50))),
    )
    .insert(
        "Maize",
        CropProfile::new(55, "18-27°C", 500.0, 1000.0).with_npk(npk((60, 100), (35, 60), (15, 25))),
    )
    .insert(
        "Cotton",
        CropProfile::new(60, "21-30°C", 500.0, 1000.0)
            .with_npk(npk((100, 140), (35, 60), (15, 25))),
    )
    .insert(
        "Sugarcane",
        CropProfile::new(90, "20-35°C", 750.0, 1500.0).with_npk(npk((80, 120), (40, 60), (40, 60))),
    )
    .insert(
        "Soybean",
        CropProfile::new(55, "20-30°C", 600.0, 1000.0).with_npk(npk((20, 40), (60, 80), (40, 60))),
    )
    .insert(
        "Groundnut",
        CropProfile::new(45, "20-30°C", 500.0, 1250.0).with_npk(npk((10, 30), (40, 60), (30, 50))),
    )
    .insert(
        "Chickpea",
        CropProfile::new(30, "15-25°C", 400.0, 600.0).with_npk(npk((20, 60), (55, 80), (75, 85))),
    )
    .insert(
        "Lentil",
        CropProfile::new(30, "15-25°C", 350.0, 550.0).with_npk(npk((0, 40), (55, 80), (15, 25))),
    )
    .insert(
        "Jute",
        CropProfile::new(85, "24-37°C", 1200.0, 2000.0)
            .with_npk(npk((60, 100), (35, 60), (35, 45))),
    )
    .insert(
        "Coffee",
        CropProfile::new(75, "15-28°C", 1500.0, 2500.0)
            .with_npk(npk((80, 120), (15, 40), (25, 45))),
    )
    .insert(
        "Coconut",
        CropProfile::new(80, "20-32°C", 1000.0, 2500.0).with_npk(npk((0, 40), (5, 30), (25, 35))),
    )
    .insert(
        "Banana",
        CropProfile::new(85, "15-35°C", 1200.0, 2200.0)
            .with_npk(npk((80, 120), (70, 95), (45, 55))),
    )
    .insert(
        "Apple",
        CropProfile::new(60, "21-24°C", 1000.0, 1250.0)
            .with_npk(npk((0, 40), (120, 145), (195, 205))),
    )
    .insert(
        "Watermelon",
        CropProfile::new(50, "24-30°C", 300.0, 600.0).with_npk(npk((80, 120), (5, 30), (45, 55))),
    )
    .insert(
        "Muskmelon",
        CropProfile::new(45, "24-32°C", 300.0, 600.0).with_npk(npk((80, 120), (5, 30), (45, 55))),
    )
    .insert(
        "Moong",
        CropProfile::new(35, "25-35°C", 400.0, 800.0).with_npk(npk((0, 40), (35, 60), (15, 25))),
    )
    .insert("Bajra", CropProfile::new(30, "25-35°C", 250.0, 600.0))
    .insert("Jowar", CropProfile::new(35, "25-32°C", 400.0, 1000.0))
    .insert("Barley", CropProfile::new(40, "12-25°C", 300.0, 600.0))
    .insert("Mustard", CropProfile::new(35, "10-25°C", 300.0, 500.0))
    .insert("Peas", CropProfile::new(40, "10-20°C", 400.0, 600.0))
    .insert("Potato", CropProfile::new(55, "15-20°C", 500.0, 700.0))
    .insert("Tea", CropProfile::new(85, "20-30°C", 1500.0, 3000.0))
    .insert("Rubber", CropProfile::new(85, "25-34°C", 2000.0, 3500.0))
    .insert("Black Pepper", CropProfile::new(80, "20-30°C", 1250.0, 2500.0))
    .insert("Cashew", CropProfile::new(50, "20-35°C", 1000.0, 2000.0))
    .insert("Ragi", CropProfile::new(40, "20-30°C", 500.0, 1000.0))
    .insert("Tobacco", CropProfile::new(50, "20-30°C", 500.0, 1000.0))
    .insert("Cucumber", CropProfile::new(55, "18-30°C", 400.0, 700.0))
    .insert("Fodder", CropProfile::new(50, "20-35°C", 400.0, 900.0))
    .insert("Vegetables", CropProfile::new(60, "15-30°C", 400.0, 1000.0));
    t
}

fn standard_growth_periods() -> BTreeMap<String, String> {
    [
        ("Rice", "120-150 days"),
        ("Wheat", "110-130 days"),
        ("Maize", "90-110 days"),
        ("Cotton", "150-180 days"),
        ("Sugarcane", "10-12 months"),
        ("Soybean", "90-120 days"),
        ("Groundnut", "100-130 days"),
        ("Bajra", "70-90 days"),
        ("Jowar", "100-115 days"),
        ("Barley", "100-120 days"),
        ("Mustard", "110-140 days"),
        ("Chickpea", "95-110 days"),
        ("Potato", "90-120 days"),
        ("Jute", "120-150 days"),
        ("Watermelon", "80-100 days"),
        ("Cucumber", "50-70 days"),
        ("Banana", "9-12 months"),
        ("Tea", "Perennial"),
        ("Coffee", "Perennial"),
        ("Rubber", "Perennial"),
        ("Coconut", "Perennial"),
        ("Black Pepper", "Perennial"),
        ("Apple", "Perennial"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn standard_soil_ph() -> BTreeMap<SoilType, String> {
    [
        (SoilType::Alluvial, "6.5-8.0"),
        (SoilType::Arid, "7.5-8.5"),
        (SoilType::Black, "7.2-8.5"),
        (SoilType::Red, "5.5-7.0"),
        (SoilType::Mountain, "5.0-6.5"),
        (SoilType::Laterite, "4.5-6.0"),
        (SoilType::Loam, "6.0-7.0"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_string()))
    .collect()
}

fn standard_rainfall() -> KeyedTable<RegionalRainfall> {
    let rows: &[(&str, f64, f64)] = &[
        ("Andhra Pradesh", 940.0, 910.0),
        ("Arunachal Pradesh", 2780.0, 2900.0),
        ("Assam", 2820.0, 2650.0),
        ("Bihar", 1180.0, 1050.0),
        ("Chhattisgarh", 1290.0, 1350.0),
        ("Delhi", 610.0, 790.0),
        ("Goa", 3000.0, 2850.0),
        ("Gujarat", 850.0, 780.0),
        ("Haryana", 550.0, 610.0),
        ("Himachal Pradesh", 1250.0, 1180.0),
        ("Jammu and Kashmir", 1000.0, 1050.0),
        ("Jharkhand", 1250.0, 1150.0),
        ("Karnataka", 1150.0, 1240.0),
        ("Kerala", 2900.0, 3050.0),
        ("Madhya Pradesh", 1080.0, 1150.0),
        ("Maharashtra", 1170.0, 1100.0),
        ("Manipur", 1470.0, 1400.0),
        ("Meghalaya", 2820.0, 3100.0),
        ("Mizoram", 2500.0, 2350.0),
        ("Nagaland", 1800.0, 1750.0),
        ("Odisha", 1450.0, 1500.0),
        ("Punjab", 600.0, 580.0),
        ("Rajasthan", 420.0, 390.0),
        ("Sikkim", 2700.0, 2600.0),
        ("Tamil Nadu", 950.0, 1000.0),
        ("Telangana", 900.0, 950.0),
        ("Tripura", 2200.0, 2100.0),
        ("Uttar Pradesh", 950.0, 880.0),
        ("Uttarakhand", 1530.0, 1450.0),
        ("West Bengal", 1750.0, 1650.0),
    ];

    let mut t = KeyedTable::new(RegionalRainfall::new(1100.0, 1050.0));
    for (state, current, previous) in rows {
        t.insert(*state, RegionalRainfall::new(*current, *previous));
    }
    t
}
