//! Regional rainfall model

use serde::{Deserialize, Serialize};

/// Current and previous season rainfall for a region, in millimetres
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RegionalRainfall {
    pub current_mm: f64,
    pub previous_mm: f64,
}

impl RegionalRainfall {
    pub const fn new(current_mm: f64, previous_mm: f64) -> Self {
        Self {
            current_mm,
            previous_mm,
        }
    }

    /// Change against the previous season, as a percentage
    pub fn change_percent(&self) -> Option<f64> {
        if self.previous_mm <= 0.0 {
            return None;
        }
        Some((self.current_mm - self.previous_mm) / self.previous_mm * 100.0)
    }
}
