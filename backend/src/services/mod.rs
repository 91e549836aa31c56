//! Business logic services for the Crop Advisor Platform

pub mod recommendation;

pub use recommendation::RecommendationService;
