use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Failure fetching one of the upstream datasets.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Upstream returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch trading pairs: {0}")]
    Upstream(#[from] SourceError),
    #[error("Pair not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// JSON error body shared by the server and the one-shot shell.
    pub fn body(&self) -> serde_json::Value {
        let error = match self {
            ApiError::Upstream(_) => "Failed to fetch trading pairs",
            ApiError::NotFound(_) => "Pair not found",
        };

        serde_json::json!({
            "success": false,
            "error": error,
            "message": self.to_string(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let upstream = ApiError::from(SourceError::Status(502)).into_response();
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = ApiError::NotFound("EQ123".to_string()).into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_message_is_carried() {
        let err = ApiError::from(SourceError::Network("connection reset".to_string()));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_upstream_body() {
        let body = ApiError::from(SourceError::Status(503)).body();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch trading pairs");
        assert_eq!(body["message"], "Failed to fetch trading pairs: Upstream returned status 503");
    }
}
