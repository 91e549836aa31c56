//! HTTP handlers for the Crop Advisor Platform

pub mod health;
pub mod recommendation;
pub mod reference;

pub use health::health_check;
pub use recommendation::{recommend_for_location, recommend_for_soil};
pub use reference::{classify_region, current_season, get_crop_profile, get_rainfall};
