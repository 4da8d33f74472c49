use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Datastore error: {0}")]
    Datastore(#[from] DatastoreError),
}

/// Error type for the hosted datastore RPC client
#[derive(Error, Debug)]
pub enum DatastoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DatastoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DatastoreError::ConnectionError(_) | DatastoreError::RateLimitError(_)
        )
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            DatastoreError::ConnectionError(_) => "connection_error",
            DatastoreError::RateLimitError(_) => "rate_limit",
            DatastoreError::ParseError(_) => "parse_error",
            DatastoreError::InvalidRequest(_) => "invalid_request",
            DatastoreError::InternalError(_) => "internal_error",
        }
    }
}

impl From<reqwest::Error> for DatastoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DatastoreError::ConnectionError(
                "Datastore request timed out. Please check connectivity.".to_string(),
            )
        } else if err.is_connect() {
            DatastoreError::ConnectionError(
                "Failed to connect to the hosted datastore. Please check connectivity."
                    .to_string(),
            )
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => DatastoreError::RateLimitError(
                    "Too many requests to the datastore. Retry after backoff.".to_string(),
                ),
                401 | 403 => DatastoreError::InvalidRequest(
                    "Datastore rejected the service key. Check DATASTORE_SERVICE_KEY.".to_string(),
                ),
                500..=599 => DatastoreError::ConnectionError(format!(
                    "Datastore server error (HTTP {}). Please try again later.",
                    status.as_u16()
                )),
                _ => DatastoreError::InternalError(format!("HTTP error: {}", status)),
            }
        } else {
            DatastoreError::InternalError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DatastoreError {
    fn from(err: serde_json::Error) -> Self {
        DatastoreError::ParseError(format!("JSON parsing failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DatastoreError::ConnectionError("down".into()).is_retryable());
        assert!(DatastoreError::RateLimitError("slow down".into()).is_retryable());
        assert!(!DatastoreError::ParseError("bad json".into()).is_retryable());
        assert!(!DatastoreError::InvalidRequest("bad key".into()).is_retryable());
    }

    #[test]
    fn test_error_type_labels() {
        assert_eq!(
            DatastoreError::RateLimitError("x".into()).error_type(),
            "rate_limit"
        );
        assert_eq!(
            DatastoreError::InternalError("x".into()).error_type(),
            "internal_error"
        );
    }
}
