use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};
use tracing::error;

use crate::api::response::{ApiError, ApiResult, PrettyJson};
use crate::models::{Average, AverageList, ALL_USERS};
use crate::repositories::GenerationRepository;

use super::AppState;

pub async fn get_all_users_average(State(state): State<AppState>) -> ApiResult<Average> {
    lookup_average(&state, ALL_USERS).await
}

pub async fn get_user_average(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> ApiResult<Average> {
    let Path(username) = username?;
    if username.is_empty() || username.eq_ignore_ascii_case("undefined") {
        return lookup_average(&state, ALL_USERS).await;
    }
    lookup_average(&state, &username).await
}

async fn lookup_average(state: &AppState, username: &str) -> ApiResult<Average> {
    match GenerationRepository::new(&state.pool)
        .find_average(username)
        .await
    {
        Ok(Some(average)) => Ok(PrettyJson(average)),
        Ok(None) => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Could not find user '{}'", username),
        )),
        Err(e) => {
            error!("Failed to load average for '{}': {}", username, e);
            Err(ApiError::internal("Failed to load average"))
        }
    }
}

pub async fn get_all_averages(State(state): State<AppState>) -> ApiResult<AverageList> {
    match GenerationRepository::new(&state.pool).list_averages().await {
        Ok(averages) => Ok(PrettyJson(AverageList { averages })),
        Err(e) => {
            error!("Failed to list averages: {}", e);
            Err(ApiError::internal("Failed to list averages"))
        }
    }
}
