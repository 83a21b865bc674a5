use rng_service::api::{self, AppState};
use rng_service::config::{Configuration, DEFAULT_CONFIG_PATH};
use rng_service::db;
use rng_service::middleware::cors_layer;
use rng_service::random::OsRandom;
use rng_service::repositories::GenerationRepository;

use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATABASE_URL: &str = "sqlite://RNG.sqlite";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rng_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RNG service v{}", env!("CARGO_PKG_VERSION"));

    let config_path =
        env::var("RNG_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Configuration::load_or_init(&config_path)?;
    info!("Loaded configuration from {}", config_path);

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    info!("Opening database {}...", database_url);
    let pool = db::connect(&database_url).await?;
    db::migrate(&pool).await?;

    let stored = GenerationRepository::new(&pool).count().await?;
    info!("Database holds {} generation(s)", stored);

    let addr = config.bind_address();
    let cors = cors_layer(&config);
    let state = AppState::new(pool.clone(), config, Arc::new(OsRandom::new()));

    let app = api::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
