//! Location-based crop recommendation pipeline
//!
//! Four pure stages: coordinates are classified into soil and climate, the
//! date is resolved to a season, candidate crops are selected for that
//! combination, and the candidates are scored and ranked.

pub mod classifier;
pub mod ranker;
pub mod season;
pub mod selector;
pub mod yield_estimate;

use std::sync::Arc;

use chrono::NaiveDate;

pub use classifier::classify;
pub use ranker::{is_preferred, rainfall_suitability, rank, seasonality_label, RankingContext};
pub use season::{resolve_season, today};
pub use selector::{select_candidates, CandidateSet};
pub use yield_estimate::{FixedYieldEstimator, HashedYieldEstimator, YieldEstimator};

use crate::models::{RankedCrop, Recommendation, RecommendationRequest, RegionClassification};
use crate::reference::ReferenceData;
use crate::types::GpsCoordinates;

/// Entry point bundling reference data with a yield estimator.
///
/// Cheap to clone and safe to share between request handlers.
#[derive(Clone)]
pub struct CropAdvisor {
    reference: Arc<ReferenceData>,
    yields: Arc<dyn YieldEstimator>,
}

impl Default for CropAdvisor {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceData::standard()))
    }
}

impl CropAdvisor {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            yields: Arc::new(HashedYieldEstimator),
        }
    }

    pub fn with_yield_estimator(mut self, yields: Arc<dyn YieldEstimator>) -> Self {
        self.yields = yields;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Soil type and climate only
    pub fn classify(&self, latitude: f64, longitude: f64) -> RegionClassification {
        classify(&self.reference, &GpsCoordinates::new(latitude, longitude))
    }

    /// Ranked crops for a coordinate, using default regional rainfall
    pub fn classify_and_recommend(
        &self,
        latitude: f64,
        longitude: f64,
        interested_crops: &[String],
        as_of: NaiveDate,
    ) -> Vec<RankedCrop> {
        self.recommend(&RecommendationRequest {
            location: GpsCoordinates::new(latitude, longitude),
            interested_crops: interested_crops.to_vec(),
            region: None,
            as_of,
        })
        .crops
    }

    /// Full pipeline. An empty candidate set gives an empty crop list.
    pub fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let classification = classify(&self.reference, &request.location);
        let season = resolve_season(&request.as_of, request.location.latitude);
        let candidates = select_candidates(
            &self.reference,
            classification.climate,
            classification.soil_type,
            season,
        );

        let region = request
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        let context = RankingContext {
            classification,
            season,
            region,
        };
        let crops = rank(
            &self.reference,
            &candidates,
            &context,
            &request.interested_crops,
            self.yields.as_ref(),
        );

        Recommendation {
            classification,
            season,
            region: region.map(str::to_string),
            crops,
        }
    }
}
