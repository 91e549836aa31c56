//! Yield bracket selection

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::models::SoilType;

/// Chooses a yield bracket index for a crop that the user did not ask about
pub trait YieldEstimator: Send + Sync {
    /// Returns an index in `0..bracket_count`. `bracket_count` is never zero.
    fn bracket_index(
        &self,
        crop: &str,
        region: Option<&str>,
        soil_type: SoilType,
        bracket_count: usize,
    ) -> usize;
}

/// Stable pseudo-random bracket derived from crop, region and soil.
///
/// Same inputs always give the same bracket across runs. The hash width
/// follows the target's pointer size, so 32-bit builds may pick differently.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedYieldEstimator;

impl YieldEstimator for HashedYieldEstimator {
    fn bracket_index(
        &self,
        crop: &str,
        region: Option<&str>,
        soil_type: SoilType,
        bracket_count: usize,
    ) -> usize {
        let mut hasher = FxHasher::default();
        crop.to_lowercase().hash(&mut hasher);
        region.map(str::to_lowercase).hash(&mut hasher);
        (soil_type as u8).hash(&mut hasher);
        (hasher.finish() % bracket_count as u64) as usize
    }
}

/// Always picks the same bracket
#[derive(Debug, Clone, Copy)]
pub struct FixedYieldEstimator(pub usize);

impl YieldEstimator for FixedYieldEstimator {
    fn bracket_index(&self, _: &str, _: Option<&str>, _: SoilType, bracket_count: usize) -> usize {
        self.0 % bracket_count
    }
}
