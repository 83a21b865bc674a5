pub mod averages;
pub mod generations;
pub mod health;
pub mod response;
pub mod rng;
pub mod users;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use sqlx::SqlitePool;

use crate::config::Configuration;
use crate::middleware::require_api_key;
use crate::random::RandomSource;

pub const API_BASE_PATH: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Configuration>,
    pub random: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Configuration, random: Arc<dyn RandomSource>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            random,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/RandomFloat0to1", get(rng::random_float))
        .route("/RandomFloat0to1/{username}", get(rng::random_float_for_user))
        .route("/GetAverageRNG", get(averages::get_all_users_average))
        .route("/GetAverageRNG/{username}", get(averages::get_user_average))
        .route("/GetAllAveragesRNG", get(averages::get_all_averages))
        .route("/GetUsers", get(users::get_users))
        .route("/GetGenerationDetails", get(generations::get_generation_details))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let v1 = Router::new()
        .route("/Ping", get(health::ping))
        .merge(protected)
        .with_state(state);

    Router::new().nest(API_BASE_PATH, v1)
}
