use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use crate::api::AppState;
use crate::errors::AegisError;
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Checks `x-api-key`. Absent is accepted unless `api_token` is configured;
/// present-but-empty is always rejected.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AegisError> {
    let provided = match request.headers().get(API_KEY_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AegisError::Authentication("Malformed API key".into()))?
                .trim(),
        ),
        None => None,
    };

    let expected = state.config.api_token.as_deref().filter(|t| !t.is_empty());

    match (provided, expected) {
        (Some(""), _) => {
            warn!("Rejected request with empty API key");
            return Err(AegisError::Authentication("Empty API key".into()));
        }
        (Some(key), Some(token)) if key != token => {
            warn!("Rejected request with mismatched API key");
            return Err(AegisError::Authentication("Invalid API key".into()));
        }
        (None, Some(_)) => {
            return Err(AegisError::Authentication("Missing API key".into()));
        }
        _ => {}
    }

    Ok(next.run(request).await)
}
