//! HTTP transport error handling
//!
//! Converts internal errors to JSON error responses with appropriate HTTP
//! status codes. Note that missing or sparse analytics data is NOT an error
//! at this layer: handlers degrade those into sentinel values so the
//! dashboard never crashes on thin data.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Engine error: {0}")]
    Insights(#[from] crate::error::InsightsError),
}

impl ApiError {
    /// Stable machine-readable error type label
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::Insights(_) => "engine_error",
        }
    }

    /// Get HTTP status code for error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Insights(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for HTTP transport operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_bad_request() {
        let err = ApiError::InvalidRequest("unknown section 'valuations'".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "invalid_request");
    }

    #[test]
    fn test_internal_maps_to_500() {
        let err = ApiError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "internal_error");
    }
}
