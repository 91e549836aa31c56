//! Candidate crop selection

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Climate, Season, SoilType};
use crate::reference::ReferenceData;

/// Crop names with no duplicates, in first-insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CandidateSet {
    names: Vec<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a crop; returns false if the exact name is already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        let mut seen = HashSet::new();
        for name in iter {
            let name = name.into();
            if seen.insert(name.clone()) {
                set.names.push(name);
            }
        }
        set
    }
}

impl From<Vec<String>> for CandidateSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<CandidateSet> for Vec<String> {
    fn from(set: CandidateSet) -> Self {
        set.names
    }
}

/// Union of the climate/soil crop list and the first few crops of the season.
///
/// A missing climate/soil entry contributes nothing. Duplicates are dropped by
/// exact name; final ordering is left to the ranker.
pub fn select_candidates(
    reference: &ReferenceData,
    climate: Climate,
    soil_type: SoilType,
    season: Season,
) -> CandidateSet {
    let regional = reference.crops_for(climate, soil_type);
    let seasonal = reference
        .season_crops(season)
        .iter()
        .take(reference.seasonal_candidate_count);

    regional.iter().chain(seasonal).cloned().collect()
}
