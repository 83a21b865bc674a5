use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};
use tracing::{error, info};

use crate::api::response::{ApiError, ApiResult, PrettyJson};
use crate::models::GenerationEvent;
use crate::random::RandomSource;
use crate::repositories::GenerationRepository;

use super::AppState;

pub const RESERVED_USERNAME: &str = "all";
const PLACEHOLDER_PREFIX: &str = "Debug";
const PLACEHOLDER_DIGITS: u64 = 9;

pub async fn random_float(State(state): State<AppState>) -> ApiResult<GenerationEvent> {
    generate(&state, "").await
}

pub async fn random_float_for_user(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> ApiResult<GenerationEvent> {
    let Path(username) = username?;
    generate(&state, &username).await
}

async fn generate(state: &AppState, username: &str) -> ApiResult<GenerationEvent> {
    let username = resolve_username(state.random.as_ref(), username)?;

    let event = GenerationEvent::new(username, state.random.next_unit_float()?);

    if let Err(e) = GenerationRepository::new(&state.pool).insert(&event).await {
        error!("Failed to save generation {}: {}", event.id, e);
        return Err(ApiError::internal("Failed to save generation"));
    }

    info!("Generated value for user '{}' ({})", event.user, event.id);

    Ok(PrettyJson(event))
}

/// Applies the placeholder and reserved-name rules to a caller supplied
/// username.
pub(crate) fn resolve_username(
    random: &dyn RandomSource,
    username: &str,
) -> Result<String, ApiError> {
    if username.is_empty() || username.eq_ignore_ascii_case("undefined") {
        let digit = random.next_below(PLACEHOLDER_DIGITS)?;
        return Ok(format!("{}{}", PLACEHOLDER_PREFIX, digit));
    }

    if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Err(ApiError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("The username '{}' is reserved.", username),
        ));
    }

    Ok(username.to_string())
}
