//! Recommendation ranker: scores candidate crops and orders them best first

use std::cmp::Ordering;

use crate::engine::selector::CandidateSet;
use crate::engine::yield_estimate::YieldEstimator;
use crate::models::{
    Climate, CropProfile, RainfallAssessment, RankedCrop, RegionClassification, Season,
};
use crate::reference::ReferenceData;

/// Score gap beyond which rainfall suitability overrides user preference
pub const SUITABILITY_WINDOW: u8 = 15;

/// Extra water demand shown for crops the user asked about
const PREFERRED_WATER_BONUS: u8 = 5;
const PREFERRED_WATER_CAP: u8 = 95;

const SEASONAL_GROWTH_PERIOD: &str = "90-120 days";
const OFF_SEASON_GROWTH_PERIOD: &str = "100-150 days";
const YEAR_ROUND: &str = "Year-round";

/// Where and when the ranking applies
#[derive(Debug, Clone, Copy)]
pub struct RankingContext<'a> {
    pub classification: RegionClassification,
    pub season: Season,
    /// State name for rainfall lookup
    pub region: Option<&'a str>,
}

struct Scored {
    crop: RankedCrop,
    preferred: bool,
    in_season: bool,
}

/// Rainfall suitability on a 0-100 scale.
///
/// Below the band the score scales up to 70; above it, it falls by the
/// relative excess; inside it, it loses at most 20 points toward the edges.
pub fn rainfall_suitability(current_mm: f64, min_mm: f64, max_mm: f64) -> u8 {
    let score = if current_mm < min_mm {
        (current_mm / min_mm) * 70.0
    } else if current_mm > max_mm {
        (100.0 - ((current_mm - max_mm) / max_mm) * 100.0).max(0.0)
    } else {
        let width = max_mm - min_mm;
        if width <= 0.0 {
            100.0
        } else {
            let midpoint = (min_mm + max_mm) / 2.0;
            100.0 - ((current_mm - midpoint).abs() / width) * 20.0
        }
    };
    // NaN saturates to 0
    score.round().clamp(0.0, 100.0) as u8
}

/// True when an interest and the crop name contain one another, ignoring case.
///
/// Blank and whitespace-only interests are skipped on purpose: an empty string
/// is a substring of every crop name and would mark the whole list preferred.
pub fn is_preferred(crop: &str, interests: &[String]) -> bool {
    let crop = crop.to_lowercase();
    interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .any(|i| crop.contains(&i) || i.contains(&crop))
}

/// Comma-joined names of every season listing the crop, or "Year-round"
pub fn seasonality_label(reference: &ReferenceData, crop: &str) -> String {
    let seasons: Vec<String> = Season::ALL
        .iter()
        .filter(|s| reference.season_crops(**s).iter().any(|c| c == crop))
        .map(|s| s.to_string())
        .collect();

    if seasons.is_empty() {
        YEAR_ROUND.to_string()
    } else {
        seasons.join(", ")
    }
}

/// Score every candidate and return them best match first
pub fn rank(
    reference: &ReferenceData,
    candidates: &CandidateSet,
    context: &RankingContext<'_>,
    interests: &[String],
    yields: &dyn YieldEstimator,
) -> Vec<RankedCrop> {
    let rainfall = reference.regional_rainfall(context.region);
    let current_season = reference.season_crops(context.season);

    let mut scored: Vec<Scored> = candidates
        .iter()
        .map(|name| {
            let profile = reference.crop_profile(name);
            let preferred = is_preferred(name, interests);
            let in_season = current_season.iter().any(|c| c == name);

            let suitability = rainfall_suitability(
                rainfall.current_mm,
                profile.min_rainfall_mm,
                profile.max_rainfall_mm,
            );

            let crop = RankedCrop {
                name: name.to_string(),
                description: describe(name, context, in_season),
                water_needs: water_needs(profile, preferred),
                growth_period: growth_period(reference, name, in_season),
                ideal_temperature: profile.ideal_temperature.clone(),
                soil_ph: reference
                    .soil_ph_for(context.classification.soil_type)
                    .to_string(),
                yield_estimate: yield_estimate(reference, name, context, preferred, yields),
                seasonality: seasonality_label(reference, name),
                rainfall: RainfallAssessment {
                    required: profile.rainfall_band(),
                    current_mm: rainfall.current_mm,
                    previous_mm: rainfall.previous_mm,
                    suitability,
                },
            };

            Scored {
                crop,
                preferred,
                in_season,
            }
        })
        .collect();

    let climate = context.classification.climate;
    stable_insertion_sort_by(&mut scored, |a, b| compare(a, b, climate));

    scored.into_iter().map(|s| s.crop).collect()
}

fn water_needs(profile: &CropProfile, preferred: bool) -> u8 {
    if preferred {
        profile
            .water_needs_base
            .saturating_add(PREFERRED_WATER_BONUS)
            .min(PREFERRED_WATER_CAP)
    } else {
        profile.water_needs_base
    }
}

fn growth_period(reference: &ReferenceData, crop: &str, in_season: bool) -> String {
    match reference.growth_periods.get(crop) {
        Some(period) => period.clone(),
        None if in_season => SEASONAL_GROWTH_PERIOD.to_string(),
        None => OFF_SEASON_GROWTH_PERIOD.to_string(),
    }
}

fn yield_estimate(
    reference: &ReferenceData,
    crop: &str,
    context: &RankingContext<'_>,
    preferred: bool,
    yields: &dyn YieldEstimator,
) -> String {
    let brackets = &reference.yield_brackets;
    if brackets.is_empty() {
        return "Not available".to_string();
    }
    let index = if preferred {
        reference.preferred_yield_bracket
    } else {
        yields.bracket_index(
            crop,
            context.region,
            context.classification.soil_type,
            brackets.len(),
        )
    };
    brackets
        .get(index)
        .unwrap_or(&brackets[0])
        .clone()
}

fn describe(crop: &str, context: &RankingContext<'_>, in_season: bool) -> String {
    let soil = context.classification.soil_type.to_string().to_lowercase();
    let climate = context.classification.climate.to_string().to_lowercase();
    if in_season {
        format!(
            "{} is well suited to {} soil in a {} climate and is a {} season crop.",
            crop, soil, climate, context.season
        )
    } else {
        format!(
            "{} is well suited to {} soil in a {} climate.",
            crop, soil, climate
        )
    }
}

/// Multi-key ordering: current season, then a decisive rainfall gap, then user
/// preference, then water efficiency in arid regions.
fn compare(a: &Scored, b: &Scored, climate: Climate) -> Ordering {
    if a.in_season != b.in_season {
        return b.in_season.cmp(&a.in_season);
    }

    let sa = a.crop.rainfall.suitability;
    let sb = b.crop.rainfall.suitability;
    if sa.abs_diff(sb) > SUITABILITY_WINDOW {
        return sb.cmp(&sa);
    }

    if a.preferred != b.preferred {
        return b.preferred.cmp(&a.preferred);
    }

    if climate == Climate::Arid {
        return a.crop.water_needs.cmp(&b.crop.water_needs);
    }

    Ordering::Equal
}

/// Stable sort that tolerates comparators which are not a total order.
///
/// The suitability window makes `compare` non-transitive, and the std sorts
/// may panic when they detect that.
fn stable_insertion_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::yield_estimate::{FixedYieldEstimator, HashedYieldEstimator};
    use crate::models::{RegionalRainfall, SoilType};

    fn context(climate: Climate, soil_type: SoilType, season: Season) -> RankingContext<'static> {
        RankingContext {
            classification: RegionClassification { soil_type, climate },
            season,
            region: None,
        }
    }

    fn data_with_rainfall(current: f64) -> ReferenceData {
        let mut data = ReferenceData::standard();
        data.rainfall.default = RegionalRainfall::new(current, current);
        data
    }

    fn names(ranked: &[RankedCrop]) -> Vec<&str> {
        ranked.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_suitability_inside_band_at_midpoint() {
        assert_eq!(rainfall_suitability(1500.0, 1000.0, 2000.0), 100);
    }

    #[test]
    fn test_suitability_below_band() {
        assert_eq!(rainfall_suitability(300.0, 1000.0, 2000.0), 21);
    }

    #[test]
    fn test_suitability_above_band() {
        // 100 - (500 / 2000) * 100 = 75
        assert_eq!(rainfall_suitability(2500.0, 1000.0, 2000.0), 75);
        // far above the band bottoms out at zero
        assert_eq!(rainfall_suitability(5000.0, 1000.0, 2000.0), 0);
    }

    #[test]
    fn test_suitability_at_band_edge() {
        // |1000 - 1500| / 1000 * 20 = 10
        assert_eq!(rainfall_suitability(1000.0, 1000.0, 2000.0), 90);
        assert_eq!(rainfall_suitability(2000.0, 1000.0, 2000.0), 90);
    }

    #[test]
    fn test_suitability_zero_width_band() {
        assert_eq!(rainfall_suitability(800.0, 800.0, 800.0), 100);
    }

    #[test]
    fn test_is_preferred_substring_both_ways() {
        let interests = vec!["rice".to_string()];
        assert!(is_preferred("Rice", &interests));
        let interests = vec!["Basmati Rice".to_string()];
        assert!(is_preferred("Rice", &interests));
        let interests = vec!["wheat".to_string(), "  ".to_string()];
        assert!(!is_preferred("Rice", &interests));
    }

    #[test]
    fn test_seasonality_label() {
        let data = ReferenceData::standard();
        assert_eq!(seasonality_label(&data, "Rice"), "Kharif");
        assert_eq!(seasonality_label(&data, "Tea"), "Year-round");

        let mut data = ReferenceData::standard();
        data.seasonal_crops
            .get_mut(&Season::Zaid)
            .unwrap()
            .push("Maize".to_string());
        assert_eq!(seasonality_label(&data, "Maize"), "Kharif, Zaid");
    }

    #[test]
    fn test_in_season_crop_sorts_first() {
        // Same rainfall band for both; only Rice is a kharif crop
        let mut data = data_with_rainfall(1500.0);
        data.crop_profiles
            .insert("Coconut", CropProfile::new(80, "20-32°C", 1000.0, 2000.0));
        let candidates: CandidateSet = ["Coconut", "Rice"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Alluvial, Season::Kharif),
            &[],
            &FixedYieldEstimator(0),
        );
        assert_eq!(ranked[0].rainfall.suitability, ranked[1].rainfall.suitability);
        assert_eq!(names(&ranked), vec!["Rice", "Coconut"]);
    }

    #[test]
    fn test_large_suitability_gap_beats_preference() {
        // At 1500 mm: Rice 100, Wheat 0 (far above its 450-650 band)
        let data = data_with_rainfall(1500.0);
        let candidates: CandidateSet = ["Wheat", "Rice"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Subtropical, SoilType::Alluvial, Season::Zaid),
            &["wheat".to_string()],
            &FixedYieldEstimator(0),
        );
        assert_eq!(names(&ranked), vec!["Rice", "Wheat"]);
    }

    #[test]
    fn test_preference_breaks_close_suitability() {
        // At 1000 mm: Rice 90, Coconut 90 (both at the bottom of their bands)
        let data = data_with_rainfall(1000.0);
        let candidates: CandidateSet = ["Rice", "Coconut"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Alluvial, Season::Zaid),
            &["coconut".to_string()],
            &FixedYieldEstimator(0),
        );
        assert_eq!(names(&ranked), vec!["Coconut", "Rice"]);
    }

    #[test]
    fn test_gap_equal_to_window_defers_to_preference() {
        // At 1150 mm: Alpha 100 (band midpoint), Beta 85 (15% above its band)
        let mut data = data_with_rainfall(1150.0);
        data.crop_profiles
            .insert("Alpha", CropProfile::new(50, "20-30°C", 1000.0, 1300.0))
            .insert("Beta", CropProfile::new(50, "20-30°C", 500.0, 1000.0));
        let candidates: CandidateSet = ["Alpha", "Beta"].into_iter().collect();
        let ctx = context(Climate::Subtropical, SoilType::Alluvial, Season::Zaid);
        let interests = ["beta".to_string()];

        let ranked = rank(&data, &candidates, &ctx, &interests, &FixedYieldEstimator(0));
        assert_eq!(names(&ranked), vec!["Beta", "Alpha"]);
        assert_eq!(ranked[0].rainfall.suitability, 85);
        assert_eq!(ranked[1].rainfall.suitability, 100);

        // One point past the window: Beta 84, rainfall decides
        data.crop_profiles
            .insert("Beta", CropProfile::new(50, "20-30°C", 500.0, 990.0));
        let ranked = rank(&data, &candidates, &ctx, &interests, &FixedYieldEstimator(0));
        assert_eq!(names(&ranked), vec!["Alpha", "Beta"]);
        assert_eq!(ranked[1].rainfall.suitability, 84);
    }

    #[test]
    fn test_arid_climate_prefers_low_water_crops() {
        // At 500 mm: Bajra 96 (water 30) and Mustard 90 (water 35), gap under 15
        let data = data_with_rainfall(500.0);
        let candidates: CandidateSet = ["Mustard", "Bajra"].into_iter().collect();

        let arid = rank(
            &data,
            &candidates,
            &context(Climate::Arid, SoilType::Arid, Season::Zaid),
            &[],
            &FixedYieldEstimator(0),
        );
        assert_eq!(names(&arid), vec!["Bajra", "Mustard"]);

        // Without the arid tie-break the input order is kept
        let tropical = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Arid, Season::Zaid),
            &[],
            &FixedYieldEstimator(0),
        );
        assert_eq!(names(&tropical), vec!["Mustard", "Bajra"]);
    }

    #[test]
    fn test_preferred_crop_attributes() {
        let data = data_with_rainfall(1500.0);
        let candidates: CandidateSet = ["Rice", "Coconut"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Laterite, Season::Kharif),
            &["rice".to_string()],
            &FixedYieldEstimator(3),
        );
        let rice = ranked.iter().find(|c| c.name == "Rice").unwrap();
        assert_eq!(rice.water_needs, 85);
        assert_eq!(rice.yield_estimate, "3-5 tons/acre");
        assert_eq!(rice.soil_ph, "4.5-6.0");
        assert_eq!(rice.growth_period, "120-150 days");
        assert_eq!(rice.rainfall.required, "1000-2000 mm");

        let coconut = ranked.iter().find(|c| c.name == "Coconut").unwrap();
        assert_eq!(coconut.water_needs, 80);
        assert_eq!(coconut.yield_estimate, "5-8 tons/acre");
        assert_eq!(coconut.seasonality, "Year-round");
    }

    #[test]
    fn test_water_needs_capped() {
        let data = ReferenceData::standard();
        let candidates: CandidateSet = ["Sugarcane"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Black, Season::Kharif),
            &["sugarcane".to_string()],
            &FixedYieldEstimator(0),
        );
        assert_eq!(ranked[0].water_needs, 95);
    }

    #[test]
    fn test_growth_period_fallbacks() {
        let data = ReferenceData::standard();
        let candidates: CandidateSet = ["Moong", "Ragi"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Red, Season::Zaid),
            &[],
            &FixedYieldEstimator(0),
        );
        let moong = ranked.iter().find(|c| c.name == "Moong").unwrap();
        let ragi = ranked.iter().find(|c| c.name == "Ragi").unwrap();
        assert_eq!(moong.growth_period, "90-120 days");
        assert_eq!(ragi.growth_period, "100-150 days");
    }

    #[test]
    fn test_unknown_crop_uses_default_profile() {
        let data = data_with_rainfall(1000.0);
        let candidates: CandidateSet = ["Dragonfruit"].into_iter().collect();
        let ranked = rank(
            &data,
            &candidates,
            &context(Climate::Tropical, SoilType::Red, Season::Kharif),
            &[],
            &FixedYieldEstimator(0),
        );
        assert_eq!(ranked[0].water_needs, 60);
        assert_eq!(ranked[0].ideal_temperature, "20-30°C");
        assert_eq!(ranked[0].rainfall.suitability, 100);
    }

    #[test]
    fn test_empty_candidates_give_empty_ranking() {
        let data = ReferenceData::standard();
        let ranked = rank(
            &data,
            &CandidateSet::new(),
            &context(Climate::Tropical, SoilType::Red, Season::Kharif),
            &[],
            &HashedYieldEstimator,
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ranking_is_repeatable() {
        let data = ReferenceData::standard();
        let candidates = crate::engine::select_candidates(
            &data,
            Climate::Subtropical,
            SoilType::Alluvial,
            Season::Rabi,
        );
        let ctx = RankingContext {
            region: Some("Uttar Pradesh"),
            ..context(Climate::Subtropical, SoilType::Alluvial, Season::Rabi)
        };
        let first = rank(&data, &candidates, &ctx, &[], &HashedYieldEstimator);
        let second = rank(&data, &candidates, &ctx, &[], &HashedYieldEstimator);
        assert_eq!(first, second);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        stable_insertion_sort_by(&mut items, |a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
