//! Candidate selection and ranking integration tests
//!
//! Tests for the last two pipeline stages including:
//! - Property 3: Candidate sets never contain duplicates
//! - Property 4: Rainfall suitability stays within 0-100
//! - Property 5: Ranking is deterministic and keeps every candidate

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    rainfall_suitability, select_candidates, Climate, CropAdvisor, FixedYieldEstimator,
    GpsCoordinates, RecommendationRequest, ReferenceData, Season, SoilType,
};

fn date(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, 15).unwrap()
}

fn request(
    lat: f64,
    lon: f64,
    interests: &[&str],
    region: Option<&str>,
    month: u32,
) -> RecommendationRequest {
    RecommendationRequest {
        location: GpsCoordinates::new(lat, lon),
        interested_crops: interests.iter().map(|s| s.to_string()).collect(),
        region: region.map(str::to_string),
        as_of: date(month),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Jodhpur in the monsoon: arid/arid candidates plus early kharif crops
    #[test]
    fn test_jodhpur_kharif_candidates() {
        let advisor = CropAdvisor::default();
        let rec = advisor.recommend(&request(26.3, 73.0, &[], Some("Rajasthan"), 7));

        assert_eq!(rec.classification.soil_type, SoilType::Arid);
        assert_eq!(rec.classification.climate, Climate::Arid);
        assert_eq!(rec.season, Season::Kharif);

        let names: Vec<&str> = rec.crops.iter().map(|c| c.name.as_str()).collect();
        for kharif in ["Rice", "Maize", "Cotton"] {
            assert!(names.contains(&kharif), "missing {}", kharif);
        }
        assert!(rec.crops.iter().all(|c| c.rainfall.current_mm == 420.0));
    }

    /// In-season crops always come before off-season crops
    #[test]
    fn test_in_season_partition() {
        let advisor = CropAdvisor::default();
        for month in 1..=12 {
            let rec = advisor.recommend(&request(26.85, 80.95, &["potato"], None, month));
            let season = rec.season.to_string();
            let flags: Vec<bool> = rec
                .crops
                .iter()
                .map(|c| c.description.ends_with(&format!("{} season crop.", season)))
                .collect();
            let first_off = flags.iter().position(|f| !f).unwrap_or(flags.len());
            assert!(
                flags[first_off..].iter().all(|f| !f),
                "month {}: {:?}",
                month,
                flags
            );
        }
    }

    /// A preferred crop gets the preferred yield bracket and extra water need
    #[test]
    fn test_preferred_crop_fields() {
        let advisor = CropAdvisor::default().with_yield_estimator(Arc::new(FixedYieldEstimator(0)));
        let rec = advisor.recommend(&request(26.85, 80.95, &["WHEAT"], None, 12));

        let wheat = rec.crops.iter().find(|c| c.name == "Wheat").unwrap();
        assert_eq!(wheat.yield_estimate, "3-5 tons/acre");
        assert_eq!(wheat.water_needs, 55);

        let rice = rec.crops.iter().find(|c| c.name == "Rice").unwrap();
        assert_eq!(rice.yield_estimate, "2-3 tons/acre");
        assert_eq!(rice.water_needs, 80);
    }

    /// Region names resolve through the lookup chain
    #[test]
    fn test_region_lookup_chain() {
        let advisor = CropAdvisor::default();
        let exact = advisor.recommend(&request(26.85, 80.95, &[], Some("Uttar Pradesh"), 1));
        let lower = advisor.recommend(&request(26.85, 80.95, &[], Some("uttar pradesh"), 1));
        let partial = advisor.recommend(&request(26.85, 80.95, &[], Some("Uttar"), 1));
        let unknown = advisor.recommend(&request(26.85, 80.95, &[], Some("Atlantis"), 1));

        assert_eq!(exact.crops[0].rainfall.current_mm, 950.0);
        assert_eq!(lower.crops[0].rainfall.current_mm, 950.0);
        assert_eq!(partial.crops[0].rainfall.current_mm, 950.0);
        assert_eq!(unknown.crops[0].rainfall.current_mm, 1100.0);
    }

    /// Reference tables loaded from JSON drive the pipeline
    #[test]
    fn test_json_reference_override() {
        let mut data = ReferenceData::standard();
        data.crops_by_climate_soil.clear();
        data.seasonal_crops.clear();
        data.seasonal_crops.insert(Season::Zaid, vec!["Watermelon".to_string()]);

        let json = data.to_json().unwrap();
        let loaded = ReferenceData::from_json(&json).unwrap();
        let advisor = CropAdvisor::new(Arc::new(loaded));

        let crops = advisor.classify_and_recommend(26.85, 80.95, &[], date(4));
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].name, "Watermelon");
        assert_eq!(crops[0].seasonality, "Zaid");

        assert!(advisor.classify_and_recommend(26.85, 80.95, &[], date(7)).is_empty());
    }

    /// Ranked crops serialize with camelCase keys
    #[test]
    fn test_ranked_crop_json() {
        let advisor = CropAdvisor::default();
        let crops = advisor.classify_and_recommend(18.5, 73.85, &[], date(8));
        let json = serde_json::to_value(&crops[0]).unwrap();
        let keys = [
            "name",
            "waterNeeds",
            "growthPeriod",
            "idealTemperature",
            "soilPh",
            "yieldEstimate",
        ];
        for key in keys {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["rainfall"].get("suitability").is_some());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn climate_strategy() -> impl Strategy<Value = Climate> {
        prop_oneof![
            Just(Climate::Tropical),
            Just(Climate::Subtropical),
            Just(Climate::Arid),
            Just(Climate::Humid),
            Just(Climate::Mountain),
            Just(Climate::Temperate),
        ]
    }

    fn soil_strategy() -> impl Strategy<Value = SoilType> {
        prop::sample::select(SoilType::ALL.to_vec())
    }

    fn season_strategy() -> impl Strategy<Value = Season> {
        prop::sample::select(Season::ALL.to_vec())
    }

    fn interests_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop_oneof![
                Just("rice".to_string()),
                Just("Wheat".to_string()),
                Just("cot".to_string()),
                Just(" ".to_string()),
                "[a-z]{0,8}",
            ],
            0..4,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // ====================================================================
        // Property 3: Unique Candidates
        // ====================================================================

        /// Property 3: Candidates are unique and include the regional list
        #[test]
        fn prop_candidates_unique(
            climate in climate_strategy(),
            soil in soil_strategy(),
            season in season_strategy(),
        ) {
            let data = ReferenceData::standard();
            let set = select_candidates(&data, climate, soil, season);
            let names: Vec<&str> = set.iter().collect();

            let mut deduped = names.clone();
            deduped.sort_unstable();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), names.len());

            for crop in data.crops_for(climate, soil) {
                prop_assert!(set.contains(crop));
            }
        }

        // ====================================================================
        // Property 4: Suitability Range
        // ====================================================================

        /// Property 4: Suitability is always within 0-100
        #[test]
        fn prop_suitability_in_range(
            current in 0.0f64..5000.0,
            min in 1.0f64..3000.0,
            width in 0.0f64..3000.0,
        ) {
            let score = rainfall_suitability(current, min, min + width);
            prop_assert!(score <= 100);
            if current >= min && current <= min + width {
                prop_assert!(score >= 80);
            }
        }

        // ====================================================================
        // Property 5: Deterministic Ranking
        // ====================================================================

        /// Property 5: Same request, same ranking, same candidates
        #[test]
        fn prop_ranking_deterministic(
            lat in 0.0f64..45.0,
            lon in 60.0f64..100.0,
            month in 1u32..=12,
            interests in interests_strategy(),
        ) {
            let advisor = CropAdvisor::default();
            let req = RecommendationRequest {
                location: GpsCoordinates::new(lat, lon),
                interested_crops: interests,
                region: None,
                as_of: date(month),
            };

            let first = advisor.recommend(&req);
            let second = advisor.recommend(&req);
            prop_assert_eq!(&first, &second);

            let data = advisor.reference();
            let candidates = select_candidates(
                data,
                first.classification.climate,
                first.classification.soil_type,
                first.season,
            );
            prop_assert_eq!(first.crops.len(), candidates.len());
            for crop in &first.crops {
                prop_assert!(candidates.contains(&crop.name));
                prop_assert!(crop.rainfall.suitability <= 100);
            }
        }
    }
}
