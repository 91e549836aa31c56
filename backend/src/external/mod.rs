//! External API integrations

pub mod geocoding;
pub mod recommendation;

pub use geocoding::GeocodingClient;
pub use recommendation::RecommendationClient;
