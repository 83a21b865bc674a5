use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::api::response::ApiError;
use crate::api::AppState;

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if !constant_time_eq(provided, state.config.api_key.as_bytes()) {
        warn!("Rejected request to {} with invalid API key", request.uri().path());
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "API Key does not match",
        ));
    }

    debug!("API key accepted for {}", request.uri().path());
    Ok(next.run(request).await)
}

/// Byte equality whose running time depends only on the input lengths.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
