use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::AegisError;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Remediation Error";

impl IntoResponse for AegisError {
    fn into_response(self) -> axum::response::Response {
        let class = self.classify();
        if !class.client_error {
            error!(error_type = class.error_type, error = %self, "Request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": INTERNAL_ERROR_MESSAGE})),
            )
                .into_response();
        }

        let (status, message) = match self {
            AegisError::Authentication(m) => (StatusCode::UNAUTHORIZED, m),
            AegisError::Permission(m) => (StatusCode::FORBIDDEN, m),
            AegisError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            AegisError::InvalidInput(m) => (StatusCode::BAD_REQUEST, m),
            other => (StatusCode::BAD_REQUEST, other.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
