use axum::extract::State;
use tracing::error;

use crate::api::response::{ApiError, ApiResult, PrettyJson};
use crate::models::UserList;
use crate::repositories::GenerationRepository;

use super::AppState;

pub async fn get_users(State(state): State<AppState>) -> ApiResult<UserList> {
    match GenerationRepository::new(&state.pool).list_users().await {
        Ok(users) => Ok(PrettyJson(UserList { users })),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(ApiError::internal("Failed to list users"))
        }
    }
}
