//! Error handling for the Crop Advisor Platform
//!
//! Provides consistent error responses in English and Hindi

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_hi: String,
    },

    // External service errors
    #[error("Recommendation service is not configured")]
    RecommendationServiceUnavailable,

    #[error("Recommendation service error: {0}")]
    RecommendationService(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on a named request field
    pub fn validation(field: &str, message: &str, message_hi: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_hi: message_hi.to_string(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_hi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation {
                field,
                message,
                message_hi,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_hi: message_hi.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::RecommendationServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "RECOMMENDATION_SERVICE_UNAVAILABLE".to_string(),
                    message_en: "Soil-based recommendations are temporarily unavailable"
                        .to_string(),
                    message_hi: "मिट्टी आधारित सुझाव अस्थायी रूप से उपलब्ध नहीं हैं".to_string(),
                    field: None,
                },
            ),
            AppError::RecommendationService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "RECOMMENDATION_SERVICE_ERROR".to_string(),
                    message_en: format!("Recommendation service error: {}", msg),
                    message_hi: format!("सुझाव सेवा में त्रुटि: {}", msg),
                    field: None,
                },
            ),
            AppError::Geocoding(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "GEOCODING_ERROR".to_string(),
                    message_en: format!("Geocoding error: {}", msg),
                    message_hi: format!("स्थान सेवा में त्रुटि: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_hi: format!("कॉन्फ़िगरेशन त्रुटि: {}", msg),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_hi: "सर्वर में आंतरिक त्रुटि हुई".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_field() {
        let (status, detail) = AppError::validation(
            "latitude",
            "Latitude must be between -90 and 90",
            "अक्षांश -90 और 90 के बीच होना चाहिए",
        )
        .status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("latitude"));
        assert_eq!(detail.message_en, "Latitude must be between -90 and 90");
        assert_eq!(detail.message_hi, "अक्षांश -90 और 90 के बीच होना चाहिए");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::RecommendationServiceUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::RecommendationService("timeout".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Geocoding("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Configuration("bad tables".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_and_detail().0, expected);
        }
    }

    #[test]
    fn test_error_body_shape() {
        let (_, detail) = AppError::RecommendationServiceUnavailable.status_and_detail();
        let json = serde_json::to_value(ErrorResponse { error: detail }).unwrap();
        assert_eq!(json["error"]["code"], "RECOMMENDATION_SERVICE_UNAVAILABLE");
        assert!(json["error"].get("field").is_none());
    }
}
